//! Character roster: filter dock and a flat grid of the visible list

use crate::catalog::CharacterRecord;
use crate::i18n::Texts;
use crate::router::Route;
use crate::state::Snapshot;

use super::{controls, CharacterCard, DisplayTree, Node, RegionId};

pub fn render(
    snapshot: &Snapshot<'_>,
    texts: &Texts<'_>,
    visible: &[&CharacterRecord],
) -> DisplayTree {
    DisplayTree::new(
        Route::Characters,
        vec![
            controls::filter_dock(snapshot, texts),
            Node::Region {
                id: RegionId::RosterGrid,
                children: grid(snapshot, texts, visible),
            },
        ],
    )
}

/// Contents of the roster grid region.
pub fn grid(
    snapshot: &Snapshot<'_>,
    texts: &Texts<'_>,
    visible: &[&CharacterRecord],
) -> Vec<Node> {
    if visible.is_empty() {
        return vec![Node::Placeholder(texts.or("no_results", "No results found."))];
    }
    vec![Node::Grid(
        visible
            .iter()
            .map(|character| CharacterCard::new(character, snapshot.language, false))
            .collect(),
    )]
}
