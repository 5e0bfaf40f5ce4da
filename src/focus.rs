//! Guide focus: which character the guide view details

use serde::{Deserialize, Serialize};

use crate::catalog::CharacterRecord;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuideFocus {
    #[default]
    NoFocus,
    Focused(String),
}

impl GuideFocus {
    pub fn id(&self) -> Option<&str> {
        match self {
            GuideFocus::NoFocus => None,
            GuideFocus::Focused(id) => Some(id),
        }
    }

    pub fn is_on(&self, id: &str) -> bool {
        self.id() == Some(id)
    }
}

/// Re-derives focus against the current visible list.
///
/// A focus that is still visible is kept. Otherwise focus moves to the first
/// visible character, or to `NoFocus` when nothing is visible.
pub fn reconcile(focus: &GuideFocus, visible: &[&CharacterRecord]) -> GuideFocus {
    match focus {
        GuideFocus::Focused(id) if visible.iter().any(|character| &character.id == id) => {
            focus.clone()
        }
        _ => visible
            .first()
            .map(|character| GuideFocus::Focused(character.id.clone()))
            .unwrap_or(GuideFocus::NoFocus),
    }
}

/// Neighbour of the focused character in the visible list, `step` places away.
/// Clamps at both ends.
pub fn step(focus: &GuideFocus, visible: &[&CharacterRecord], step: isize) -> Option<String> {
    if visible.is_empty() {
        return None;
    }
    let current = focus
        .id()
        .and_then(|id| visible.iter().position(|character| character.id == id))
        .unwrap_or(0);
    let last = visible.len() - 1;
    let next = current.saturating_add_signed(step).min(last);
    visible.get(next).map(|character| character.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Grade, Position, Tier};
    use std::collections::BTreeMap;

    fn character(id: &str) -> CharacterRecord {
        CharacterRecord {
            id: id.to_string(),
            name: BTreeMap::from([("en".to_string(), id.to_uppercase())]),
            position: Position::WS,
            grade: Grade::A,
            tier: Tier::A,
            image: String::new(),
            guide: None,
        }
    }

    #[test]
    fn test_no_focus_takes_first_visible() {
        let (a, b) = (character("a"), character("b"));
        assert_eq!(
            reconcile(&GuideFocus::NoFocus, &[&a, &b]),
            GuideFocus::Focused("a".into())
        );
        assert_eq!(reconcile(&GuideFocus::NoFocus, &[]), GuideFocus::NoFocus);
    }

    #[test]
    fn test_visible_focus_is_kept() {
        let (a, b, c) = (character("a"), character("b"), character("c"));
        let focus = GuideFocus::Focused("b".into());
        assert_eq!(reconcile(&focus, &[&a, &b, &c]), focus);
    }

    #[test]
    fn test_filtered_out_focus_moves_to_first() {
        let (a, c) = (character("a"), character("c"));
        let focus = GuideFocus::Focused("b".into());
        assert_eq!(reconcile(&focus, &[&a, &c]), GuideFocus::Focused("a".into()));
        assert_eq!(reconcile(&focus, &[]), GuideFocus::NoFocus);
    }

    #[test]
    fn test_step_clamps() {
        let (a, b, c) = (character("a"), character("b"), character("c"));
        let visible = [&a, &b, &c];
        let focus = GuideFocus::Focused("b".into());
        assert_eq!(step(&focus, &visible, 1).as_deref(), Some("c"));
        assert_eq!(step(&focus, &visible, -1).as_deref(), Some("a"));
        assert_eq!(step(&GuideFocus::Focused("c".into()), &visible, 1).as_deref(), Some("c"));
        assert_eq!(step(&GuideFocus::Focused("a".into()), &visible, -1).as_deref(), Some("a"));
        assert_eq!(step(&focus, &[], 1), None);
    }
}
