//! Render dispatcher: full view renders vs. filtered-region updates
//!
//! The surface remembers the view-relevant fields it last rendered. On commit it
//! diffs them against the current state: a search/filter change on a list view
//! replaces only that view's filtered region, everything else renders the view
//! through the router. Both paths produce the same tree for the same state.

use crate::focus::GuideFocus;
use crate::router::{self, Route};
use crate::selection::Filter;
use crate::state::Snapshot;
use crate::view::{DisplayTree, Node, RegionId};

/// View-relevant fields of the state at the time of a render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewKey {
    pub language: String,
    pub route: Route,
    pub search: String,
    pub filter: Filter,
    pub focus: GuideFocus,
}

impl ViewKey {
    pub fn of(snapshot: &Snapshot<'_>) -> Self {
        Self {
            language: snapshot.language.to_string(),
            route: snapshot.route,
            search: snapshot.search.to_string(),
            filter: snapshot.filter.clone(),
            focus: snapshot.focus.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateChange {
    pub language: bool,
    pub route: bool,
    pub search: bool,
    pub filter: bool,
    pub focus: bool,
}

impl StateChange {
    pub fn between(previous: &ViewKey, next: &ViewKey) -> Self {
        Self {
            language: previous.language != next.language,
            route: previous.route != next.route,
            search: previous.search != next.search,
            filter: previous.filter != next.filter,
            focus: previous.focus != next.focus,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPlan {
    /// Nothing view-relevant changed; keep the committed tree.
    Skip,
    /// Render the whole view. `reset_scroll` is set when the route changed.
    Full { reset_scroll: bool },
    /// Replace only the given region.
    Region(RegionId),
}

/// Picks the smallest render that keeps the surface in sync with `change`.
pub fn plan(change: &StateChange, route: Route) -> RenderPlan {
    if change.is_empty() {
        return RenderPlan::Skip;
    }
    if change.route || change.language || change.focus {
        return RenderPlan::Full {
            reset_scroll: change.route,
        };
    }
    match route.filtered_region() {
        Some(region) => RenderPlan::Region(region),
        None => RenderPlan::Full {
            reset_scroll: false,
        },
    }
}

pub fn render_full(snapshot: &Snapshot<'_>) -> DisplayTree {
    let texts = snapshot.texts();
    let visible = snapshot.visible();
    router::resolve(snapshot.route)(snapshot, &texts, &visible)
}

pub fn render_region(snapshot: &Snapshot<'_>, region: RegionId) -> Vec<Node> {
    let texts = snapshot.texts();
    let visible = snapshot.visible();
    router::resolve_region(region)(snapshot, &texts, &visible)
}

/// Committed display state: the current tree plus scroll positions.
#[derive(Debug, Default)]
pub struct Surface {
    tree: Option<DisplayTree>,
    key: Option<ViewKey>,
    scroll: u16,
    strip_offset: usize,
    full_renders: usize,
    region_renders: usize,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the tree in line with `snapshot` and returns the plan that ran.
    pub fn commit(&mut self, snapshot: &Snapshot<'_>) -> RenderPlan {
        let key = ViewKey::of(snapshot);
        let planned = match (&self.tree, &self.key) {
            (Some(_), Some(previous)) => plan(&StateChange::between(previous, &key), key.route),
            _ => RenderPlan::Full { reset_scroll: true },
        };

        let executed = match planned {
            RenderPlan::Skip => RenderPlan::Skip,
            RenderPlan::Region(region) => {
                let children = render_region(snapshot, region);
                let replaced = self
                    .tree
                    .as_mut()
                    .is_some_and(|tree| tree.replace_region(region, children));
                if replaced {
                    self.region_renders += 1;
                    planned
                } else {
                    self.full(snapshot, false)
                }
            }
            RenderPlan::Full { reset_scroll } => self.full(snapshot, reset_scroll),
        };

        if executed != RenderPlan::Skip {
            tracing::debug!(?executed, route = ?key.route, "render committed");
        }
        self.key = Some(key);
        executed
    }

    fn full(&mut self, snapshot: &Snapshot<'_>, reset_scroll: bool) -> RenderPlan {
        self.tree = Some(render_full(snapshot));
        if reset_scroll {
            self.scroll = 0;
            self.strip_offset = 0;
        }
        self.full_renders += 1;
        RenderPlan::Full { reset_scroll }
    }

    pub fn tree(&self) -> Option<&DisplayTree> {
        self.tree.as_ref()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: u16) {
        self.scroll = scroll;
    }

    pub fn scroll_by(&mut self, delta: i16) {
        self.scroll = self.scroll.saturating_add_signed(delta);
    }

    /// Offset of the first card shown in the guide strip.
    pub fn strip_offset(&self) -> usize {
        self.strip_offset
    }

    pub fn set_strip_offset(&mut self, offset: usize) {
        self.strip_offset = offset;
    }

    pub fn full_renders(&self) -> usize {
        self.full_renders
    }

    pub fn region_renders(&self) -> usize {
        self.region_renders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CharacterRecord, Grade, Library, Position, Tier};
    use crate::i18n::TranslationTable;
    use crate::selection::{Choice, FilterUpdate};
    use crate::state::AppState;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn library() -> Library {
        let characters = [
            ("a", "Alpha", Position::WS),
            ("b", "Bravo", Position::MB),
            ("c", "Charlie", Position::SE),
        ]
        .into_iter()
        .map(|(id, name, position)| CharacterRecord {
            id: id.to_string(),
            name: BTreeMap::from([("en".to_string(), name.to_string())]),
            position,
            grade: Grade::A,
            tier: Tier::A,
            image: String::new(),
            guide: None,
        })
        .collect();
        let translations =
            TranslationTable::new(BTreeMap::from([("en".to_string(), BTreeMap::new())]));
        Library::new(characters, translations).unwrap()
    }

    fn commit(surface: &mut Surface, state: &AppState) -> RenderPlan {
        surface.commit(&state.snapshot().unwrap())
    }

    #[test]
    fn test_plan_table() {
        let search = StateChange {
            search: true,
            ..Default::default()
        };
        assert_eq!(plan(&search, Route::Characters), RenderPlan::Region(RegionId::RosterGrid));
        assert_eq!(plan(&search, Route::Guide), RenderPlan::Region(RegionId::GuideList));
        assert_eq!(
            plan(&search, Route::TierList),
            RenderPlan::Full {
                reset_scroll: false
            }
        );

        let route = StateChange {
            route: true,
            search: true,
            ..Default::default()
        };
        assert_eq!(plan(&route, Route::Characters), RenderPlan::Full { reset_scroll: true });

        let focus = StateChange {
            filter: true,
            focus: true,
            ..Default::default()
        };
        assert_eq!(plan(&focus, Route::Guide), RenderPlan::Full { reset_scroll: false });
        assert_eq!(plan(&StateChange::default(), Route::Guide), RenderPlan::Skip);
    }

    #[test]
    fn test_first_commit_is_full() {
        let state = AppState::with_library(library());
        let mut surface = Surface::new();
        assert_eq!(commit(&mut surface, &state), RenderPlan::Full { reset_scroll: true });
        assert_eq!(commit(&mut surface, &state), RenderPlan::Skip);
        assert_eq!(surface.full_renders(), 1);
    }

    #[test]
    fn test_partial_render_matches_full_render() {
        let mut state = AppState::with_library(library());
        state.set_route(Route::Characters);
        let mut surface = Surface::new();
        commit(&mut surface, &state);

        state.set_search("a".into());
        assert_eq!(
            commit(&mut surface, &state),
            RenderPlan::Region(RegionId::RosterGrid)
        );
        assert_eq!(surface.tree(), Some(&render_full(&state.snapshot().unwrap())));

        state.set_filter(FilterUpdate::Position(Choice::Only(Position::MB)));
        assert_eq!(
            commit(&mut surface, &state),
            RenderPlan::Region(RegionId::RosterGrid)
        );
        assert_eq!(surface.tree(), Some(&render_full(&state.snapshot().unwrap())));
        assert_eq!(surface.region_renders(), 2);
    }

    #[test]
    fn test_guide_focus_invalidation_forces_full_render() {
        let mut state = AppState::with_library(library());
        state.set_focus("b");
        let mut surface = Surface::new();
        commit(&mut surface, &state);

        // Bravo and Charlie match; Bravo keeps the focus.
        state.set_search("r".into());
        assert_eq!(
            commit(&mut surface, &state),
            RenderPlan::Region(RegionId::GuideList)
        );

        state.set_filter(FilterUpdate::Position(Choice::Only(Position::SE)));
        assert_eq!(
            commit(&mut surface, &state),
            RenderPlan::Full {
                reset_scroll: false
            }
        );
        assert_eq!(surface.tree(), Some(&render_full(&state.snapshot().unwrap())));
    }

    #[test]
    fn test_route_change_resets_scroll_but_partial_keeps_it() {
        let mut state = AppState::with_library(library());
        state.set_route(Route::Guide);
        let mut surface = Surface::new();
        commit(&mut surface, &state);
        surface.set_scroll(4);
        surface.set_strip_offset(2);

        state.set_search("a".into());
        commit(&mut surface, &state);
        assert_eq!((surface.scroll(), surface.strip_offset()), (4, 2));

        state.set_route(Route::Characters);
        commit(&mut surface, &state);
        assert_eq!((surface.scroll(), surface.strip_offset()), (0, 0));
    }
}
