//! Actions: the five user entry points plus startup results

use serde::{Deserialize, Serialize};

use crate::catalog::Library;
use crate::router::Route;
use crate::selection::FilterUpdate;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    /// Start loading both startup documents
    Init,

    /// Result: both documents loaded and validated
    LibraryDidLoad(Library),

    /// Result: startup failed; rendering never starts
    LibraryDidError(String),

    // ===== Language category =====
    LanguageSet(String),

    /// Switch to the next advertised language
    LanguageCycle,

    // ===== Route category =====
    RouteSet(Route),

    RouteNext,

    // ===== Search category =====
    /// Start editing the search term
    SearchOpen,

    /// Stop editing (the term is kept)
    SearchClose,

    SearchChange(String),

    // ===== Filter category =====
    FilterSet(FilterUpdate),

    // ===== Focus category =====
    /// Focus a character and show its guide
    FocusSelect(String),

    /// Repaint without a state change (cursor and scroll movement)
    Render,

    Quit,
}
