//! Display tree produced by the renderers
//!
//! Renderers are pure: `(snapshot, texts, visible) -> DisplayTree`. The host paints
//! the tree; it may repaint everything on every dispatch.

pub mod controls;
pub mod guide;
pub mod home;
pub mod palette;
pub mod roster;
pub mod tierlist;

use ratatui::style::Color;

use crate::catalog::CharacterRecord;
use crate::router::Route;

/// Regions that can be replaced without re-rendering the rest of the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionId {
    RosterGrid,
    GuideList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Dim,
    Accent(Color),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CharacterCard {
    pub id: String,
    pub name: String,
    pub caption: String,
    pub image: String,
    pub accent: Color,
    pub highlighted: bool,
}

impl CharacterCard {
    pub fn new(character: &CharacterRecord, language: &str, highlighted: bool) -> Self {
        Self {
            id: character.id.clone(),
            name: character.name(language).to_string(),
            caption: format!("{} / {}", character.position, character.grade),
            image: character.image.clone(),
            accent: palette::grade_color(&character.grade),
            highlighted,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    pub label: String,
    pub color: Color,
}

/// Which filter field a select control is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterBinding {
    Position,
    Grade,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    /// `None` is the ALL option.
    pub key: Option<String>,
    pub label: String,
}

/// Input controls. Their current value is bound to state and read at paint time.
#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    Search {
        placeholder: String,
    },
    Select {
        binding: FilterBinding,
        options: Vec<SelectOption>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Heading {
        text: String,
        accent: Option<Color>,
    },
    Paragraph {
        text: String,
        tone: Tone,
    },
    Bullets(Vec<String>),
    Panel {
        title: String,
        accent: Color,
        children: Vec<Node>,
    },
    Controls(Vec<Control>),
    /// Wrapping grid of cards.
    Grid(Vec<CharacterCard>),
    /// Single horizontally scrolling row of cards.
    Strip(Vec<CharacterCard>),
    Badges(Vec<Badge>),
    TierRow {
        label: String,
        color: Color,
        members: Vec<CharacterCard>,
    },
    Placeholder(String),
    Region {
        id: RegionId,
        children: Vec<Node>,
    },
    Divider,
}

impl Node {
    pub fn paragraph(text: impl Into<String>, tone: Tone) -> Self {
        Node::Paragraph {
            text: text.into(),
            tone,
        }
    }

    fn region_mut(&mut self, id: RegionId) -> Option<&mut Vec<Node>> {
        match self {
            Node::Region {
                id: region,
                children,
            } => {
                if *region == id {
                    Some(children)
                } else {
                    children.iter_mut().find_map(|child| child.region_mut(id))
                }
            }
            Node::Panel { children, .. } => {
                children.iter_mut().find_map(|child| child.region_mut(id))
            }
            _ => None,
        }
    }

    fn region(&self, id: RegionId) -> Option<&[Node]> {
        match self {
            Node::Region {
                id: region,
                children,
            } if *region == id => Some(children),
            Node::Region { children, .. } | Node::Panel { children, .. } => {
                children.iter().find_map(|child| child.region(id))
            }
            _ => None,
        }
    }

    fn collect_cards<'a>(&'a self, selectable_only: bool, out: &mut Vec<&'a CharacterCard>) {
        match self {
            Node::Grid(cards) => out.extend(cards),
            Node::TierRow { members, .. } => out.extend(members),
            Node::Strip(cards) if !selectable_only => out.extend(cards),
            Node::Region { children, .. } | Node::Panel { children, .. } => {
                for child in children {
                    child.collect_cards(selectable_only, out);
                }
            }
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayTree {
    pub route: Route,
    pub nodes: Vec<Node>,
}

impl DisplayTree {
    pub fn new(route: Route, nodes: Vec<Node>) -> Self {
        Self { route, nodes }
    }

    pub fn region(&self, id: RegionId) -> Option<&[Node]> {
        self.nodes.iter().find_map(|node| node.region(id))
    }

    /// Replaces the children of region `id`. Returns false when the tree has no such region.
    pub fn replace_region(&mut self, id: RegionId, children: Vec<Node>) -> bool {
        match self.nodes.iter_mut().find_map(|node| node.region_mut(id)) {
            Some(slot) => {
                *slot = children;
                true
            }
            None => false,
        }
    }

    /// Cards the cursor can land on (grid and tier rows), in paint order.
    pub fn selectable_cards(&self) -> Vec<&CharacterCard> {
        let mut cards = Vec::new();
        for node in &self.nodes {
            node.collect_cards(true, &mut cards);
        }
        cards
    }

    /// Every card in the tree, in paint order.
    pub fn cards(&self) -> Vec<&CharacterCard> {
        let mut cards = Vec::new();
        for node in &self.nodes {
            node.collect_cards(false, &mut cards);
        }
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> CharacterCard {
        CharacterCard {
            id: id.to_string(),
            name: id.to_uppercase(),
            caption: String::new(),
            image: String::new(),
            accent: Color::White,
            highlighted: false,
        }
    }

    #[test]
    fn test_replace_region_only_touches_region() {
        let mut tree = DisplayTree::new(
            Route::Characters,
            vec![
                Node::Heading {
                    text: "Roster".into(),
                    accent: None,
                },
                Node::Region {
                    id: RegionId::RosterGrid,
                    children: vec![Node::Grid(vec![card("a")])],
                },
            ],
        );

        assert!(tree.replace_region(
            RegionId::RosterGrid,
            vec![Node::Placeholder("none".into())]
        ));
        assert_eq!(
            tree.region(RegionId::RosterGrid),
            Some(&[Node::Placeholder("none".into())][..])
        );
        assert!(matches!(tree.nodes[0], Node::Heading { .. }));
        assert!(!tree.replace_region(RegionId::GuideList, vec![]));
    }

    #[test]
    fn test_selectable_cards_skip_strips() {
        let tree = DisplayTree::new(
            Route::Guide,
            vec![
                Node::Strip(vec![card("s")]),
                Node::Panel {
                    title: "t".into(),
                    accent: Color::White,
                    children: vec![Node::Grid(vec![card("a"), card("b")])],
                },
            ],
        );
        let ids: Vec<&str> = tree
            .selectable_cards()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(tree.cards().len(), 3);
    }

    #[test]
    fn test_replace_region_nested_in_panel() {
        let mut tree = DisplayTree::new(
            Route::Guide,
            vec![Node::Panel {
                title: "list".into(),
                accent: Color::White,
                children: vec![Node::Region {
                    id: RegionId::GuideList,
                    children: vec![Node::Strip(vec![card("a")])],
                }],
            }],
        );

        assert!(tree.replace_region(RegionId::GuideList, vec![Node::Strip(vec![card("b")])]));
        let ids: Vec<&str> = tree.cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
        assert!(!tree.replace_region(RegionId::RosterGrid, vec![]));
    }
}
