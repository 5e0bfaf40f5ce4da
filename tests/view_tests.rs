//! Renderer and dispatcher tests over a small fixture catalog

mod common;

use pretty_assertions::assert_eq;
use spikeguide::catalog::Position;
use spikeguide::dispatch::{render_full, RenderPlan, Surface};
use spikeguide::focus::GuideFocus;
use spikeguide::router::{self, Route};
use spikeguide::selection::{self, Choice, Filter, FilterUpdate};
use spikeguide::state::AppState;
use spikeguide::view::{CharacterCard, DisplayTree, Node, RegionId};

fn texts(tree: &DisplayTree) -> Vec<String> {
    fn walk(node: &Node, out: &mut Vec<String>) {
        match node {
            Node::Heading { text, .. } | Node::Paragraph { text, .. } | Node::Placeholder(text) => {
                out.push(text.clone())
            }
            Node::Bullets(items) => out.extend(items.iter().cloned()),
            Node::Panel {
                title, children, ..
            } => {
                out.push(title.clone());
                children.iter().for_each(|child| walk(child, out));
            }
            Node::Region { children, .. } => children.iter().for_each(|child| walk(child, out)),
            Node::TierRow { label, .. } => out.push(label.clone()),
            _ => {}
        }
    }
    let mut out = Vec::new();
    tree.nodes.iter().for_each(|node| walk(node, &mut out));
    out
}

fn card_ids(cards: &[&CharacterCard]) -> Vec<String> {
    cards.iter().map(|card| card.id.clone()).collect()
}

fn render(state: &AppState) -> DisplayTree {
    render_full(&state.snapshot().unwrap())
}

#[test]
fn test_alpha_scenario_depends_on_language() {
    let characters = common::characters();
    let filter = Filter::default();

    let en = selection::select_visible(&characters, "en", "alp", &filter);
    assert_eq!(common::ids(&en), vec!["x1"]);

    let ko = selection::select_visible(&characters, "ko", "alp", &filter);
    assert!(ko.is_empty());
}

#[test]
fn test_selection_is_idempotent() {
    let characters = common::characters();
    let filter = Filter {
        position: Choice::Only(Position::MB),
        grade: Choice::All,
    };
    let first = selection::select_visible(&characters, "en", "mi", &filter);
    let second = selection::select_visible(&characters, "en", "mi", &filter);
    assert_eq!(first, second);
    assert_eq!(common::ids(&first), vec!["m1", "m2"]);
}

#[test]
fn test_resolver_maps_every_route() {
    let state = common::loaded_state();
    let snapshot = state.snapshot().unwrap();
    let texts = snapshot.texts();
    let visible = snapshot.visible();
    for route in Route::ALL {
        let tree = router::resolve(route)(&snapshot, &texts, &visible);
        assert_eq!(tree.route, route);
    }
    assert_eq!(Route::parse("nowhere"), Route::Home);
}

#[test]
fn test_home_uses_translation_defaults() {
    let tree = render(&common::loaded_state());
    let lines = texts(&tree);
    let welcome = "Explore the ultimate strategy guide with a brand new experience.";
    assert!(lines.contains(&welcome.to_string()));
    assert!(lines.contains(&"Latest Update".to_string()));
}

#[test]
fn test_roster_grid_keeps_catalog_order() {
    let mut state = common::loaded_state();
    state.set_route(Route::Characters);
    let tree = render(&state);

    assert!(matches!(tree.nodes[0], Node::Controls(_)));
    assert_eq!(card_ids(&tree.selectable_cards()), vec!["x1", "m1", "m2", "s1"]);
    let first = tree.cards()[0];
    assert_eq!(first.caption, "WS / S+");
}

#[test]
fn test_roster_shows_placeholder_for_empty_selection() {
    let mut state = common::loaded_state();
    state.set_route(Route::Characters);
    state.set_search("zzz".into());
    let tree = render(&state);

    assert_eq!(
        tree.region(RegionId::RosterGrid),
        Some(&[Node::Placeholder("No results found.".into())][..])
    );
}

#[test]
fn test_guide_detail_in_active_language() {
    let mut state = common::loaded_state();
    state.set_focus("x1");
    let tree = render(&state);
    let lines = texts(&tree);

    assert!(lines.contains(&"Jump first".to_string()));
    // Unresolved party ids are skipped.
    assert!(lines.contains(&"Mike".to_string()));
    assert!(lines.contains(&"Shared note".to_string()));

    state.set_language("ko");
    let lines = texts(&render(&state));
    assert!(lines.contains(&"점프 우선".to_string()));
    assert!(lines.contains(&"마이크".to_string()));
    assert!(lines.contains(&"Shared note".to_string()));
    // Missing ko key falls back to the default language.
    assert!(lines.contains(&"Party".to_string()));
}

#[test]
fn test_guide_without_stats_is_not_ready() {
    let mut state = common::loaded_state();
    state.set_focus("m2");
    let lines = texts(&render(&state));
    assert!(lines.contains(&"Guide in preparation".to_string()));

    state.set_focus("m1");
    let lines = texts(&render(&state));
    assert!(lines.contains(&"Guide in preparation".to_string()));
}

#[test]
fn test_guide_strip_highlights_focus() {
    let mut state = common::loaded_state();
    state.set_focus("m1");
    let tree = render(&state);

    let highlighted: Vec<&str> = tree
        .cards()
        .iter()
        .filter(|card| card.highlighted)
        .map(|card| card.id.as_str())
        .collect();
    assert_eq!(highlighted, vec!["m1"]);
    assert!(tree.selectable_cards().is_empty());
}

#[test]
fn test_guide_with_nothing_visible() {
    let mut state = common::loaded_state();
    state.set_route(Route::Guide);
    state.set_search("zzz".into());
    assert_eq!(state.focus(), &GuideFocus::NoFocus);

    let lines = texts(&render(&state));
    assert!(lines.contains(&"No results".to_string()));
    assert!(lines.contains(&"No character selected".to_string()));
}

#[test]
fn test_tier_list_groups_in_fixed_order() {
    let mut state = common::loaded_state();
    state.set_route(Route::TierList);
    let tree = render(&state);

    let rows: Vec<(String, Vec<String>)> = tree
        .nodes
        .iter()
        .filter_map(|node| match node {
            Node::TierRow { label, members, .. } => Some((
                label.clone(),
                members.iter().map(|card| card.id.clone()).collect(),
            )),
            _ => None,
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("S+".to_string(), vec!["x1".to_string()]),
            ("A".to_string(), vec!["m1".to_string(), "m2".to_string()]),
            ("B".to_string(), vec!["s1".to_string()]),
        ]
    );
}

#[test]
fn test_tier_row_removed_by_position_filter() {
    let mut state = common::loaded_state();
    state.set_route(Route::TierList);
    state.set_filter(FilterUpdate::Position(Choice::Only(Position::WS)));
    let lines = texts(&render(&state));

    assert!(lines.contains(&"S+".to_string()));
    assert!(!lines.contains(&"A".to_string()));
    assert!(!lines.contains(&"B".to_string()));
}

#[test]
fn test_tier_list_ignores_search_and_grade() {
    let mut state = common::loaded_state();
    state.set_route(Route::TierList);
    state.set_search("alpha".into());
    let tree = render(&state);
    assert_eq!(tree.selectable_cards().len(), 4);
}

#[test]
fn test_surface_partial_and_full_paths_agree() {
    let mut state = common::loaded_state();
    state.set_route(Route::Guide);
    let mut surface = Surface::new();
    surface.commit(&state.snapshot().unwrap());

    let steps: Vec<Box<dyn Fn(&mut AppState)>> = vec![
        Box::new(|s| {
            s.set_search("m".into());
        }),
        Box::new(|s| {
            s.set_filter(FilterUpdate::Position(Choice::Only(Position::MB)));
        }),
        Box::new(|s| {
            s.set_search(String::new());
        }),
        Box::new(|s| {
            s.set_language("ko");
        }),
        Box::new(|s| {
            s.set_route(Route::Characters);
        }),
        Box::new(|s| {
            s.set_filter(FilterUpdate::Position(Choice::All));
        }),
    ];

    let mut plans = Vec::new();
    for step in steps {
        step(&mut state);
        plans.push(surface.commit(&state.snapshot().unwrap()));
        assert_eq!(surface.tree(), Some(&render(&state)));
    }

    assert_eq!(
        plans,
        vec![
            // "m" hides x1 (the focus), so the focus moves and the view re-renders.
            RenderPlan::Full {
                reset_scroll: false
            },
            RenderPlan::Region(RegionId::GuideList),
            RenderPlan::Region(RegionId::GuideList),
            RenderPlan::Full {
                reset_scroll: false
            },
            RenderPlan::Full { reset_scroll: true },
            RenderPlan::Region(RegionId::RosterGrid),
        ]
    );
}
