//! Tier list: catalog grouped by tier, narrowed by the position filter only

use crate::catalog::CharacterRecord;
use crate::i18n::Texts;
use crate::router::Route;
use crate::selection;
use crate::state::Snapshot;

use super::palette;
use super::{controls, CharacterCard, DisplayTree, Node, Tone};

pub fn render(
    snapshot: &Snapshot<'_>,
    texts: &Texts<'_>,
    _visible: &[&CharacterRecord],
) -> DisplayTree {
    let mut nodes = vec![
        Node::Heading {
            text: texts.or("tier_title", "Tier List"),
            accent: None,
        },
        Node::paragraph(
            texts.or("tier_subtitle", "Current Meta Rankings"),
            Tone::Secondary,
        ),
        Node::Controls(vec![controls::position_select(texts)]),
    ];

    let groups =
        selection::group_by_tier(snapshot.library.characters(), &snapshot.filter.position);
    if groups.is_empty() {
        nodes.push(Node::Placeholder(texts.or("no_results", "No results found.")));
    }
    nodes.extend(groups.into_iter().map(|group| Node::TierRow {
        label: group.tier.to_string(),
        color: palette::tier_color(&group.tier),
        members: group
            .members
            .iter()
            .map(|character| CharacterCard::new(character, snapshot.language, false))
            .collect(),
    }));

    DisplayTree::new(Route::TierList, nodes)
}
