//! Guide view: filter dock, horizontal character strip, detail panel

use crate::catalog::{CharacterRecord, GuidePayload, GuideText};
use crate::focus::{self, GuideFocus};
use crate::i18n::Texts;
use crate::router::Route;
use crate::state::Snapshot;

use super::palette::{self, TEXT_SECONDARY};
use super::{controls, Badge, CharacterCard, DisplayTree, Node, RegionId, Tone};

pub fn render(
    snapshot: &Snapshot<'_>,
    texts: &Texts<'_>,
    visible: &[&CharacterRecord],
) -> DisplayTree {
    let focus = focus::reconcile(snapshot.focus, visible);
    let mut nodes = vec![
        controls::filter_dock(snapshot, texts),
        Node::Region {
            id: RegionId::GuideList,
            children: list(snapshot, texts, visible),
        },
    ];
    nodes.extend(detail(snapshot, texts, &focus));
    DisplayTree::new(Route::Guide, nodes)
}

/// Contents of the guide strip region. The focused character is highlighted.
pub fn list(
    snapshot: &Snapshot<'_>,
    texts: &Texts<'_>,
    visible: &[&CharacterRecord],
) -> Vec<Node> {
    if visible.is_empty() {
        return vec![Node::Placeholder(texts.or("no_results_short", "No results"))];
    }
    let focus = focus::reconcile(snapshot.focus, visible);
    vec![Node::Strip(
        visible
            .iter()
            .map(|character| {
                CharacterCard::new(character, snapshot.language, focus.is_on(&character.id))
            })
            .collect(),
    )]
}

fn detail(snapshot: &Snapshot<'_>, texts: &Texts<'_>, focus: &GuideFocus) -> Vec<Node> {
    let Some(character) = focus.id().and_then(|id| snapshot.library.character(id)) else {
        return vec![Node::Placeholder(
            texts.or("guide_no_selection", "No character selected"),
        )];
    };

    let accent = palette::grade_color(&character.grade);
    let mut nodes = vec![
        Node::Heading {
            text: character.name(snapshot.language).to_string(),
            accent: Some(accent),
        },
        Node::Badges(vec![
            Badge {
                label: character.grade.to_string(),
                color: accent,
            },
            Badge {
                label: character.position.to_string(),
                color: TEXT_SECONDARY,
            },
        ]),
    ];

    match character.ready_guide() {
        Some(guide) => nodes.extend(guide_sections(snapshot, texts, guide, accent)),
        None => nodes.push(Node::Placeholder(
            texts.or("guide_not_ready", "Guide in preparation"),
        )),
    }
    nodes
}

fn guide_sections(
    snapshot: &Snapshot<'_>,
    texts: &Texts<'_>,
    guide: &GuidePayload,
    accent: ratatui::style::Color,
) -> Vec<Node> {
    let language = snapshot.language;
    vec![
        Node::Panel {
            title: texts.or("guide_stats", "Stats"),
            accent,
            children: vec![Node::paragraph(
                localized(guide.stats.as_ref(), language),
                Tone::Primary,
            )],
        },
        Node::Panel {
            title: texts.or("guide_party", "Party"),
            accent,
            children: vec![Node::paragraph(party_line(snapshot, guide), Tone::Primary)],
        },
        Node::Panel {
            title: texts.or("guide_breakthrough", "Breakthrough"),
            accent,
            children: vec![Node::paragraph(
                localized(guide.breakthrough.as_ref(), language),
                Tone::Secondary,
            )],
        },
    ]
}

fn localized(text: Option<&GuideText>, language: &str) -> String {
    text.and_then(|text| text.resolve(language))
        .unwrap_or("-")
        .to_string()
}

/// Party member names; ids that don't resolve to a character are skipped.
fn party_line(snapshot: &Snapshot<'_>, guide: &GuidePayload) -> String {
    let names: Vec<&str> = guide
        .party
        .iter()
        .filter_map(|id| snapshot.library.character(id))
        .map(|member| member.name(snapshot.language))
        .collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
