//! Character records and the validated library loaded at startup

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::i18n::{TranslationTable, DEFAULT_LANGUAGE};

/// Court position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    WS,
    SE,
    MB,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::WS, Position::SE, Position::MB];

    pub fn code(self) -> &'static str {
        match self {
            Position::WS => "WS",
            Position::SE => "SE",
            Position::MB => "MB",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Grade shown on roster and guide cards.
///
/// Listed grades sort by a fixed priority (S+ first). Unlisted grades sort after
/// every listed one and among themselves lexicographically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Grade {
    SPlus,
    S,
    SMinus,
    APlus,
    A,
    B,
    C,
    Other(String),
}

impl Grade {
    pub const PRIORITY: [Grade; 7] = [
        Grade::SPlus,
        Grade::S,
        Grade::SMinus,
        Grade::APlus,
        Grade::A,
        Grade::B,
        Grade::C,
    ];

    pub fn parse(value: &str) -> Self {
        match value {
            "S+" => Grade::SPlus,
            "S" => Grade::S,
            "S-" => Grade::SMinus,
            "A+" => Grade::APlus,
            "A" => Grade::A,
            "B" => Grade::B,
            "C" => Grade::C,
            other => Grade::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Grade::SPlus => "S+",
            Grade::S => "S",
            Grade::SMinus => "S-",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::Other(value) => value,
        }
    }

    fn rank(&self) -> Option<usize> {
        Self::PRIORITY.iter().position(|grade| grade == self)
    }
}

impl Ord for Grade {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.as_str().cmp(other.as_str()),
        }
    }
}

impl PartialOrd for Grade {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<String> for Grade {
    fn from(value: String) -> Self {
        Grade::parse(&value)
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.as_str().to_string()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Competitive tier, used only by the tier list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    SPlus,
    S,
    APlus,
    A,
    B,
    C,
    Other(String),
}

impl Tier {
    /// Tier list display order. Characters in other tiers are never listed.
    pub const ORDER: [Tier; 6] = [Tier::SPlus, Tier::S, Tier::APlus, Tier::A, Tier::B, Tier::C];

    pub fn parse(value: &str) -> Self {
        match value {
            "S+" => Tier::SPlus,
            "S" => Tier::S,
            "A+" => Tier::APlus,
            "A" => Tier::A,
            "B" => Tier::B,
            "C" => Tier::C,
            other => Tier::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tier::SPlus => "S+",
            Tier::S => "S",
            Tier::APlus => "A+",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::Other(value) => value,
        }
    }
}

impl From<String> for Tier {
    fn from(value: String) -> Self {
        Tier::parse(&value)
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.as_str().to_string()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guide text that is either shared by all languages or given per language.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuideText {
    Shared(String),
    Localized(BTreeMap<String, String>),
}

impl GuideText {
    pub fn resolve(&self, language: &str) -> Option<&str> {
        match self {
            GuideText::Shared(text) => Some(text),
            GuideText::Localized(variants) => variants
                .get(language)
                .or_else(|| variants.get(DEFAULT_LANGUAGE))
                .map(String::as_str),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<GuideText>,
    /// Ids of recommended party members.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub party: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakthrough: Option<GuideText>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: String,
    pub name: BTreeMap<String, String>,
    pub position: Position,
    pub grade: Grade,
    pub tier: Tier,
    /// Opaque image reference, resolved by whoever shows the portrait.
    #[serde(rename = "img")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide: Option<GuidePayload>,
}

impl CharacterRecord {
    /// Display name in `language`, falling back to the default language, then the id.
    pub fn name(&self, language: &str) -> &str {
        self.name
            .get(language)
            .or_else(|| self.name.get(DEFAULT_LANGUAGE))
            .map(String::as_str)
            .unwrap_or(&self.id)
    }

    /// Guide payload, if it carries enough to show a guide.
    pub fn ready_guide(&self) -> Option<&GuidePayload> {
        self.guide.as_ref().filter(|guide| guide.stats.is_some())
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum CatalogError {
    #[error("translation table has no `{0}` entry")]
    MissingDefaultLanguage(String),
    #[error("character `{id}` has no name for language `{language}`")]
    MissingName { id: String, language: String },
    #[error("duplicate character id `{0}`")]
    DuplicateId(String),
}

/// The two startup documents, validated together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Library {
    characters: Vec<CharacterRecord>,
    translations: TranslationTable,
}

impl Library {
    pub fn new(
        characters: Vec<CharacterRecord>,
        translations: TranslationTable,
    ) -> Result<Self, CatalogError> {
        if !translations.supports(DEFAULT_LANGUAGE) {
            return Err(CatalogError::MissingDefaultLanguage(
                DEFAULT_LANGUAGE.to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for character in &characters {
            if !seen.insert(character.id.as_str()) {
                return Err(CatalogError::DuplicateId(character.id.clone()));
            }
            if let Some(language) = translations
                .languages()
                .find(|language| !character.name.contains_key(*language))
            {
                return Err(CatalogError::MissingName {
                    id: character.id.clone(),
                    language: language.to_string(),
                });
            }
        }

        Ok(Self {
            characters,
            translations,
        })
    }

    /// The catalog, in document order.
    pub fn characters(&self) -> &[CharacterRecord] {
        &self.characters
    }

    pub fn translations(&self) -> &TranslationTable {
        &self.translations
    }

    pub fn character(&self, id: &str) -> Option<&CharacterRecord> {
        self.characters.iter().find(|character| character.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, names: &[(&str, &str)]) -> CharacterRecord {
        CharacterRecord {
            id: id.to_string(),
            name: names
                .iter()
                .map(|(lang, name)| (lang.to_string(), name.to_string()))
                .collect(),
            position: Position::WS,
            grade: Grade::S,
            tier: Tier::A,
            image: format!("{id}.png"),
            guide: None,
        }
    }

    fn translations(languages: &[&str]) -> TranslationTable {
        TranslationTable::new(
            languages
                .iter()
                .map(|lang| (lang.to_string(), BTreeMap::new()))
                .collect(),
        )
    }

    #[test]
    fn test_grade_priority_order() {
        assert!(Grade::SPlus < Grade::S);
        assert!(Grade::S < Grade::SMinus);
        assert!(Grade::A < Grade::B);
        assert!(Grade::C < Grade::parse("Z"));
        assert!(Grade::parse("Z1") < Grade::parse("Z2"));
    }

    #[test]
    fn test_record_deserializes_from_document() {
        let json = r#"{
            "id": "x1",
            "name": {"en": "Alpha", "ko": "알파"},
            "position": "WS",
            "grade": "S+",
            "tier": "S+",
            "img": "x1.png",
            "guide": {
                "stats": {"en": "Fast", "ko": "빠름"},
                "party": ["x2"],
                "breakthrough": "Shared note"
            }
        }"#;
        let record: CharacterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.grade, Grade::SPlus);
        assert_eq!(record.tier, Tier::SPlus);
        assert_eq!(record.name("ko"), "알파");
        let guide = record.ready_guide().unwrap();
        assert_eq!(guide.stats.as_ref().unwrap().resolve("ko"), Some("빠름"));
        assert_eq!(
            guide.breakthrough.as_ref().unwrap().resolve("ko"),
            Some("Shared note")
        );
    }

    #[test]
    fn test_unknown_position_is_rejected() {
        let json =
            r#"{"id":"x","name":{"en":"X"},"position":"OP","grade":"S","tier":"S","img":""}"#;
        assert!(serde_json::from_str::<CharacterRecord>(json).is_err());
    }

    #[test]
    fn test_name_falls_back_to_default_language() {
        let record = record("x1", &[("en", "Alpha")]);
        assert_eq!(record.name("ja"), "Alpha");
    }

    #[test]
    fn test_localized_guide_text_falls_back_to_default_language() {
        let text = GuideText::Localized(BTreeMap::from([("en".to_string(), "Fast".to_string())]));
        assert_eq!(text.resolve("ko"), Some("Fast"));
    }

    #[test]
    fn test_library_requires_default_language() {
        let result = Library::new(vec![], translations(&["ko"]));
        assert_eq!(
            result,
            Err(CatalogError::MissingDefaultLanguage("en".to_string()))
        );
    }

    #[test]
    fn test_library_requires_every_advertised_name() {
        let result = Library::new(
            vec![record("x1", &[("en", "Alpha")])],
            translations(&["en", "ko"]),
        );
        assert_eq!(
            result,
            Err(CatalogError::MissingName {
                id: "x1".to_string(),
                language: "ko".to_string()
            })
        );
    }

    #[test]
    fn test_library_rejects_duplicate_ids() {
        let result = Library::new(
            vec![record("x1", &[("en", "A")]), record("x1", &[("en", "B")])],
            translations(&["en"]),
        );
        assert_eq!(result, Err(CatalogError::DuplicateId("x1".to_string())));
    }
}
