//! Application state - single source of truth
//!
//! View fields are private. They change only through the named transitions
//! (`set_language`, `set_route`, `set_search`, `set_filter`, `set_focus`), which is
//! what lets the render dispatcher trust a field diff to pick partial renders.

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::catalog::{CharacterRecord, Library};
use crate::focus::{self, GuideFocus};
use crate::i18n::{Texts, DEFAULT_LANGUAGE};
use crate::router::Route;
use crate::selection::{self, Filter, FilterUpdate};

pub const DEFAULT_CHARACTERS: &str = "data/characters.json";
pub const DEFAULT_TRANSLATIONS: &str = "data/translations.json";

/// Where the two startup documents live. A location is a file path or an http(s) URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSources {
    pub characters: String,
    pub translations: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            characters: DEFAULT_CHARACTERS.to_string(),
            translations: DEFAULT_TRANSLATIONS.to_string(),
        }
    }
}

/// Navigation chrome, not part of the view engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chrome {
    pub search_editing: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    sources: DataSources,
    library: DataResource<Library>,
    language: String,
    route: Route,
    search: String,
    filter: Filter,
    focus: GuideFocus,
    chrome: Chrome,
}

/// Read-only view of a loaded state, handed to renderers.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub library: &'a Library,
    pub language: &'a str,
    pub route: Route,
    pub search: &'a str,
    pub filter: &'a Filter,
    pub focus: &'a GuideFocus,
}

impl<'a> Snapshot<'a> {
    pub fn texts(&self) -> Texts<'a> {
        self.library.translations().texts(self.language)
    }

    pub fn visible(&self) -> Vec<&'a CharacterRecord> {
        selection::select_visible(
            self.library.characters(),
            self.language,
            self.search,
            self.filter,
        )
    }
}

impl AppState {
    pub fn new(sources: DataSources, language: &str) -> Self {
        Self {
            sources,
            library: DataResource::Empty,
            language: language.to_string(),
            route: Route::Home,
            search: String::new(),
            filter: Filter::default(),
            focus: GuideFocus::NoFocus,
            chrome: Chrome::default(),
        }
    }

    /// State with the library already loaded.
    pub fn with_library(library: Library) -> Self {
        let mut state = Self::default();
        state.load_library(library);
        state
    }

    pub fn sources(&self) -> &DataSources {
        &self.sources
    }

    pub fn library_resource(&self) -> &DataResource<Library> {
        &self.library
    }

    pub fn library(&self) -> Option<&Library> {
        self.library.data()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn focus(&self) -> &GuideFocus {
        &self.focus
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        Some(Snapshot {
            library: self.library()?,
            language: &self.language,
            route: self.route,
            search: &self.search,
            filter: &self.filter,
            focus: &self.focus,
        })
    }

    /// Visible list for the current search and filter; empty before the library loads.
    pub fn visible(&self) -> Vec<&CharacterRecord> {
        self.snapshot()
            .map(|snapshot| snapshot.visible())
            .unwrap_or_default()
    }

    pub fn texts(&self) -> Texts<'_> {
        self.library()
            .map(|library| library.translations().texts(&self.language))
            .unwrap_or_else(Texts::empty)
    }

    pub fn begin_loading(&mut self) {
        self.library = DataResource::Loading;
    }

    pub fn load_library(&mut self, library: Library) {
        self.language = library.translations().resolve_language(&self.language);
        self.library = DataResource::Loaded(library);
        self.settle_focus();
    }

    pub fn fail_library(&mut self, error: String) {
        self.library = DataResource::Failed(error);
    }

    pub fn set_language(&mut self, language: &str) -> bool {
        let resolved = match self.library() {
            Some(library) => library.translations().resolve_language(language),
            None => language.to_string(),
        };
        if resolved == self.language {
            return false;
        }
        self.language = resolved;
        self.settle_focus();
        true
    }

    pub fn set_route(&mut self, route: Route) -> bool {
        if route == self.route {
            return false;
        }
        self.route = route;
        self.settle_focus();
        true
    }

    pub fn set_search(&mut self, search: String) -> bool {
        if search == self.search {
            return false;
        }
        self.search = search;
        self.settle_focus();
        true
    }

    pub fn set_filter(&mut self, update: FilterUpdate) -> bool {
        if !self.filter.apply(update) {
            return false;
        }
        self.settle_focus();
        true
    }

    /// Focuses a character and switches to the guide. Unknown ids are ignored.
    pub fn set_focus(&mut self, id: &str) -> bool {
        let known = self
            .library()
            .is_some_and(|library| library.character(id).is_some());
        if !known {
            tracing::trace!(id, "ignoring focus on unknown character");
            return false;
        }
        let before = (self.route, self.focus.clone());
        self.route = Route::Guide;
        self.focus = GuideFocus::Focused(id.to_string());
        self.settle_focus();
        before != (self.route, self.focus.clone())
    }

    pub fn open_search(&mut self) -> bool {
        !std::mem::replace(&mut self.chrome.search_editing, true)
    }

    pub fn close_search(&mut self) -> bool {
        std::mem::replace(&mut self.chrome.search_editing, false)
    }

    /// Keeps the stored focus valid while the guide is showing.
    fn settle_focus(&mut self) {
        if self.route != Route::Guide {
            return;
        }
        let Some(snapshot) = self.snapshot() else {
            return;
        };
        let next = focus::reconcile(snapshot.focus, &snapshot.visible());
        if next != self.focus {
            tracing::debug!(from = ?self.focus, to = ?next, "guide focus moved");
            self.focus = next;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DataSources::default(), DEFAULT_LANGUAGE)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let library = self.library();
        vec![
            DebugSection::new("View")
                .entry("route", ron_string(&self.route))
                .entry("language", ron_string(&self.language))
                .entry("search", ron_string(&self.search))
                .entry("filter", ron_string(&self.filter))
                .entry("focus", ron_string(&self.focus)),
            DebugSection::new("Library")
                .entry("loading", ron_string(&self.library.is_loading()))
                .entry("error", ron_string(&self.library.error()))
                .entry(
                    "characters",
                    ron_string(&library.map(|library| library.characters().len())),
                )
                .entry(
                    "languages",
                    ron_string(&library.map(|library| {
                        library
                            .translations()
                            .languages()
                            .map(str::to_string)
                            .collect::<Vec<_>>()
                    })),
                )
                .entry("characters_source", ron_string(&self.sources.characters))
                .entry("translations_source", ron_string(&self.sources.translations)),
            DebugSection::new("Chrome")
                .entry("search_editing", ron_string(&self.chrome.search_editing)),
        ]
    }
}
