#![allow(dead_code)]

use spikeguide::catalog::{CharacterRecord, Library};
use spikeguide::i18n::TranslationTable;
use spikeguide::state::AppState;

pub const CHARACTERS: &str = r#"[
    {"id": "x1", "name": {"en": "Alpha", "ko": "알파"}, "position": "WS",
     "grade": "S+", "tier": "S+", "img": "img/x1.png",
     "guide": {
        "stats": {"en": "Jump first", "ko": "점프 우선"},
        "party": ["m1", "ghost"],
        "breakthrough": "Shared note"
     }},
    {"id": "m1", "name": {"en": "Mike", "ko": "마이크"}, "position": "MB",
     "grade": "A", "tier": "A", "img": "img/m1.png"},
    {"id": "m2", "name": {"en": "Milo", "ko": "마일로"}, "position": "MB",
     "grade": "B", "tier": "A", "img": "img/m2.png",
     "guide": {"party": ["x1"]}},
    {"id": "s1", "name": {"en": "Sierra", "ko": "시에라"}, "position": "SE",
     "grade": "S-", "tier": "B", "img": "img/s1.png",
     "guide": {"stats": "Set > Serve"}}
]"#;

pub const TRANSLATIONS: &str = r#"{
    "en": {
        "nav_home": "Home", "nav_chars": "Characters", "nav_guide": "Guide", "nav_tierlist": "Tier List",
        "guide_stats": "Stats", "guide_party": "Party", "guide_breakthrough": "Breakthrough",
        "search_placeholder": "Search..."
    },
    "ko": {
        "nav_home": "홈", "nav_chars": "캐릭터", "nav_guide": "가이드", "nav_tierlist": "티어표",
        "guide_stats": "스탯"
    }
}"#;

pub fn characters() -> Vec<CharacterRecord> {
    serde_json::from_str(CHARACTERS).unwrap()
}

pub fn translations() -> TranslationTable {
    serde_json::from_str(TRANSLATIONS).unwrap()
}

pub fn library() -> Library {
    Library::new(characters(), translations()).unwrap()
}

pub fn loaded_state() -> AppState {
    AppState::with_library(library())
}

pub fn ids(characters: &[&CharacterRecord]) -> Vec<String> {
    characters.iter().map(|character| character.id.clone()).collect()
}
