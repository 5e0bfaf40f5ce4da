//! Localization table and key lookup with fallbacks

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language that always resolves. Lookups fall back to it.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language code -> flat key -> localized string.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable(BTreeMap<String, BTreeMap<String, String>>);

impl TranslationTable {
    pub fn new(tables: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self(tables)
    }

    /// Advertised language codes, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn supports(&self, language: &str) -> bool {
        self.0.contains_key(language)
    }

    /// Returns `language` when the table has it, otherwise the default language.
    pub fn resolve_language(&self, language: &str) -> String {
        if self.supports(language) {
            language.to_string()
        } else {
            tracing::trace!(language, "unsupported language, using default");
            DEFAULT_LANGUAGE.to_string()
        }
    }

    /// The language after `language` in advertised order, wrapping around.
    pub fn next_language(&self, language: &str) -> Option<&str> {
        let codes: Vec<&str> = self.languages().collect();
        if codes.is_empty() {
            return None;
        }
        let next = codes
            .iter()
            .position(|code| *code == language)
            .map(|index| (index + 1) % codes.len())
            .unwrap_or(0);
        codes.get(next).copied()
    }

    pub fn texts(&self, language: &str) -> Texts<'_> {
        Texts {
            active: self.0.get(language),
            fallback: self.0.get(DEFAULT_LANGUAGE),
        }
    }
}

/// Read-only view of the strings for one language.
#[derive(Clone, Copy, Debug)]
pub struct Texts<'a> {
    active: Option<&'a BTreeMap<String, String>>,
    fallback: Option<&'a BTreeMap<String, String>>,
}

impl<'a> Texts<'a> {
    /// Texts with no entries; every lookup uses the literal default.
    pub fn empty() -> Self {
        Self {
            active: None,
            fallback: None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.active
            .and_then(|table| table.get(key))
            .or_else(|| self.fallback.and_then(|table| table.get(key)))
            .map(String::as_str)
    }

    /// Localized string for `key`, or `default` when no table has it.
    pub fn or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(text) => text.to_string(),
            None => {
                tracing::trace!(key, "missing translation key");
                default.to_string()
            }
        }
    }
}
