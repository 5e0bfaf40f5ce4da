//! Home view: static sections filled from translation keys

use crate::catalog::CharacterRecord;
use crate::i18n::Texts;
use crate::router::Route;
use crate::state::Snapshot;

use super::palette::{ACCENT_CYAN, ACCENT_PURPLE, CAFE_GREEN, TEXT_SECONDARY};
use super::{DisplayTree, Node, Tone};

pub const CAFE_URL: &str = "https://cafe.naver.com/thespike";

pub fn render(
    _snapshot: &Snapshot<'_>,
    texts: &Texts<'_>,
    _visible: &[&CharacterRecord],
) -> DisplayTree {
    let nodes = vec![
        Node::Heading {
            text: texts.or("home_greeting", "Hello, Player !"),
            accent: Some(ACCENT_CYAN),
        },
        Node::paragraph(
            texts.or("home_welcome", "Welcome to the TSCG guide."),
            Tone::Secondary,
        ),
        Node::Panel {
            title: "WELCOME".to_string(),
            accent: ACCENT_CYAN,
            children: vec![
                Node::Heading {
                    text: "THE SPIKE CROSS GUIDE 2.0".to_string(),
                    accent: None,
                },
                Node::paragraph(
                    texts.or(
                        "home_desc",
                        "Explore the ultimate strategy guide with a brand new experience.",
                    ),
                    Tone::Primary,
                ),
            ],
        },
        Node::Panel {
            title: "OFFICIAL CAFE".to_string(),
            accent: CAFE_GREEN,
            children: vec![
                Node::paragraph("Join Community", Tone::Primary),
                Node::paragraph(CAFE_URL, Tone::Accent(CAFE_GREEN)),
            ],
        },
        Node::Panel {
            title: "TIER LIST".to_string(),
            accent: ACCENT_PURPLE,
            children: vec![
                Node::paragraph("S+ RANK", Tone::Accent(ACCENT_PURPLE)),
                Node::paragraph(
                    format!("Check the meta ({})", shortcut_hint(Route::TierList)),
                    Tone::Secondary,
                ),
            ],
        },
        Node::Panel {
            title: "NOTICES".to_string(),
            accent: TEXT_SECONDARY,
            children: vec![Node::Bullets(vec![
                texts.or("home_update_1", "Latest Update"),
                texts.or("home_update_2", "System Check"),
            ])],
        },
        Node::Panel {
            title: "TIPS".to_string(),
            accent: TEXT_SECONDARY,
            children: vec![Node::paragraph(
                texts.or("home_tip_desc", "Tip provided here."),
                Tone::Primary,
            )],
        },
        Node::Divider,
        Node::paragraph("Copyright © 2026 The Spike Cross Guide", Tone::Dim),
        Node::paragraph(
            "This site is unofficial and is not affiliated with Suncyan.",
            Tone::Dim,
        ),
    ];
    DisplayTree::new(Route::Home, nodes)
}

fn shortcut_hint(route: Route) -> String {
    format!("press {}", route.index() + 1)
}
