//! Search and filter predicates that derive the visible list from the catalog

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::{CharacterRecord, Grade, Position, Tier};

/// A filter field: everything, or exactly one value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq + Clone> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(expected) => expected == value,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }

    /// Next choice in `All, options[0], options[1], ..., All` order.
    pub fn cycle(&self, options: &[T]) -> Choice<T> {
        let next = match self {
            Choice::All => 0,
            Choice::Only(value) => match options.iter().position(|option| option == value) {
                Some(index) => index + 1,
                None => options.len(),
            },
        };
        options
            .get(next)
            .cloned()
            .map(Choice::Only)
            .unwrap_or(Choice::All)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub position: Choice<Position>,
    pub grade: Choice<Grade>,
}

/// One field of the filter selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterUpdate {
    Position(Choice<Position>),
    Grade(Choice<Grade>),
}

impl Filter {
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        match update {
            FilterUpdate::Position(choice) if self.position != choice => {
                self.position = choice;
                true
            }
            FilterUpdate::Grade(choice) if self.grade != choice => {
                self.grade = choice;
                true
            }
            _ => false,
        }
    }
}

/// True when `character` passes the search term and both filter fields.
///
/// `needle` must already be lowercased.
pub fn is_visible(
    character: &CharacterRecord,
    language: &str,
    needle: &str,
    filter: &Filter,
) -> bool {
    let matches_search =
        needle.is_empty() || character.name(language).to_lowercase().contains(needle);
    matches_search
        && filter.position.admits(&character.position)
        && filter.grade.admits(&character.grade)
}

/// Catalog subsequence that passes search and filter, in catalog order.
pub fn select_visible<'a>(
    characters: &'a [CharacterRecord],
    language: &str,
    search: &str,
    filter: &Filter,
) -> Vec<&'a CharacterRecord> {
    let needle = search.to_lowercase();
    characters
        .iter()
        .filter(|character| is_visible(character, language, &needle, filter))
        .collect()
}

/// Orders grade strings by the fixed grade priority.
pub fn compare_grade(a: &str, b: &str) -> Ordering {
    Grade::parse(a).cmp(&Grade::parse(b))
}

/// Distinct grades present in the catalog, best first.
pub fn grade_options(characters: &[CharacterRecord]) -> Vec<Grade> {
    let mut grades: Vec<Grade> = Vec::new();
    for character in characters {
        if !grades.contains(&character.grade) {
            grades.push(character.grade.clone());
        }
    }
    grades.sort();
    grades
}

/// Characters of one tier, in catalog order.
#[derive(Clone, Debug, PartialEq)]
pub struct TierGroup<'a> {
    pub tier: Tier,
    pub members: Vec<&'a CharacterRecord>,
}

/// Groups characters by the fixed tier order after applying the position filter.
/// Tiers with no members are left out.
pub fn group_by_tier<'a>(
    characters: &'a [CharacterRecord],
    position: &Choice<Position>,
) -> Vec<TierGroup<'a>> {
    Tier::ORDER
        .iter()
        .filter_map(|tier| {
            let members: Vec<&CharacterRecord> = characters
                .iter()
                .filter(|character| {
                    &character.tier == tier && position.admits(&character.position)
                })
                .collect();
            (!members.is_empty()).then(|| TierGroup {
                tier: tier.clone(),
                members,
            })
        })
        .collect()
}
