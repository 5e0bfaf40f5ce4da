//! Turns a display tree into styled terminal lines
//!
//! Controls are bound: their shown value comes from the snapshot at paint time,
//! not from the tree, so a tree that only had its region replaced paints the same
//! as a freshly rendered one.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::selection::Choice;
use crate::state::Snapshot;
use crate::view::palette::{TEXT_DIM, TEXT_MAIN, TEXT_SECONDARY};
use crate::view::{CharacterCard, Control, DisplayTree, FilterBinding, Node, SelectOption, Tone};

/// Width of one grid or strip cell, separator included.
pub const CARD_WIDTH: usize = 22;
const INDENT: usize = 2;

#[derive(Clone, Copy, Debug)]
pub struct PaintContext<'a> {
    pub width: usize,
    pub columns: usize,
    /// Card under the cursor in grids and tier rows.
    pub cursor: Option<&'a str>,
    pub strip_offset: usize,
}

#[derive(Debug, Default)]
pub struct Painted {
    pub lines: Vec<Line<'static>>,
    /// First line of the card under the cursor.
    pub cursor_line: Option<usize>,
}

pub fn columns_for(width: u16) -> usize {
    (usize::from(width) / CARD_WIDTH).max(1)
}

/// Number of strip cards that fit in `width` starting at `offset`.
pub fn strip_capacity(width: usize) -> usize {
    // One cell on each side is kept for the scroll markers.
    (width.saturating_sub(4) / CARD_WIDTH).max(1)
}

/// Strip offset that keeps card `index` on screen, moving as little as possible.
pub fn follow_strip(offset: usize, index: usize, width: usize) -> usize {
    let capacity = strip_capacity(width);
    if index < offset {
        index
    } else if index >= offset + capacity {
        index + 1 - capacity
    } else {
        offset
    }
}

pub fn paint(tree: &DisplayTree, snapshot: &Snapshot<'_>, ctx: &PaintContext<'_>) -> Painted {
    let mut painter = Painter {
        snapshot,
        ctx,
        out: Painted::default(),
    };
    for node in &tree.nodes {
        painter.node(node, 0);
    }
    painter.out
}

struct Painter<'s, 'c> {
    snapshot: &'s Snapshot<'s>,
    ctx: &'c PaintContext<'c>,
    out: Painted,
}

impl Painter<'_, '_> {
    fn push(&mut self, indent: usize, mut spans: Vec<Span<'static>>) {
        if indent > 0 {
            spans.insert(0, Span::raw(" ".repeat(indent)));
        }
        self.out.lines.push(Line::from(spans));
    }

    fn blank(&mut self) {
        self.out.lines.push(Line::default());
    }

    fn inner_width(&self, indent: usize) -> usize {
        self.ctx.width.saturating_sub(indent).max(1)
    }

    fn node(&mut self, node: &Node, indent: usize) {
        match node {
            Node::Heading { text, accent } => {
                let style = Style::default()
                    .fg(accent.unwrap_or(TEXT_MAIN))
                    .add_modifier(Modifier::BOLD);
                for line in wrap(text, self.inner_width(indent)) {
                    self.push(indent, vec![Span::styled(line, style)]);
                }
            }
            Node::Paragraph { text, tone } => {
                let style = tone_style(*tone);
                for line in wrap(text, self.inner_width(indent)) {
                    self.push(indent, vec![Span::styled(line, style)]);
                }
            }
            Node::Bullets(items) => {
                let width = self.inner_width(indent + 2);
                for item in items {
                    for (index, line) in wrap(item, width).into_iter().enumerate() {
                        let marker = if index == 0 { "• " } else { "  " };
                        self.push(
                            indent,
                            vec![
                                Span::styled(marker, Style::default().fg(TEXT_DIM)),
                                Span::styled(line, Style::default().fg(TEXT_MAIN)),
                            ],
                        );
                    }
                }
            }
            Node::Panel {
                title,
                accent,
                children,
            } => {
                let rule = self.inner_width(indent).saturating_sub(text_width(title) + 3);
                self.push(
                    indent,
                    vec![
                        Span::styled("▌ ", Style::default().fg(*accent)),
                        Span::styled(
                            title.clone(),
                            Style::default().fg(*accent).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!(" {}", "─".repeat(rule)),
                            Style::default().fg(TEXT_DIM),
                        ),
                    ],
                );
                for child in children {
                    self.node(child, indent + INDENT);
                }
                self.blank();
            }
            Node::Controls(controls) => {
                let mut spans = Vec::new();
                for control in controls {
                    if !spans.is_empty() {
                        spans.push(Span::raw("   "));
                    }
                    spans.extend(self.control(control));
                }
                self.push(indent, spans);
                self.blank();
            }
            Node::Grid(cards) => self.grid(cards, indent),
            Node::Strip(cards) => self.strip(cards, indent),
            Node::Badges(badges) => {
                let mut spans = Vec::new();
                for badge in badges {
                    spans.push(Span::styled(
                        format!("[{}]", badge.label),
                        Style::default().fg(badge.color).add_modifier(Modifier::BOLD),
                    ));
                    spans.push(Span::raw(" "));
                }
                self.push(indent, spans);
                self.blank();
            }
            Node::TierRow {
                label,
                color,
                members,
            } => self.tier_row(label, *color, members, indent),
            Node::Placeholder(text) => {
                let style = Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC);
                self.blank();
                self.push(indent + INDENT, vec![Span::styled(text.clone(), style)]);
                self.blank();
            }
            Node::Region { children, .. } => {
                for child in children {
                    self.node(child, indent);
                }
            }
            Node::Divider => {
                let rule = "─".repeat(self.inner_width(indent));
                self.push(indent, vec![Span::styled(rule, Style::default().fg(TEXT_DIM))]);
            }
        }
    }

    fn control(&self, control: &Control) -> Vec<Span<'static>> {
        let label = Style::default().fg(TEXT_SECONDARY);
        let value = Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD);
        match control {
            Control::Search { placeholder } => {
                let term = self.snapshot.search;
                let shown = if term.is_empty() {
                    Span::styled(placeholder.clone(), Style::default().fg(TEXT_DIM))
                } else {
                    Span::styled(term.to_string(), value)
                };
                vec![Span::styled("[/] ", label), shown]
            }
            Control::Select { binding, options } => {
                let (key, selected) = match binding {
                    FilterBinding::Position => (
                        "[p] ",
                        choice_key(&self.snapshot.filter.position, |position| position.code()),
                    ),
                    FilterBinding::Grade => (
                        "[g] ",
                        choice_key(&self.snapshot.filter.grade, |grade| grade.as_str()),
                    ),
                };
                vec![
                    Span::styled(key, label),
                    Span::styled(selected_label(options, selected), value),
                ]
            }
        }
    }

    fn card_spans(&self, card: &CharacterCard, width: usize) -> (Span<'static>, Span<'static>) {
        let mut name_style = Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD);
        if card.highlighted {
            name_style = name_style.fg(card.accent).add_modifier(Modifier::UNDERLINED);
        }
        if self.ctx.cursor == Some(card.id.as_str()) {
            name_style = name_style.add_modifier(Modifier::REVERSED);
        }
        (
            Span::styled(pad(&truncate(&card.name, width), width), name_style),
            Span::styled(
                pad(&truncate(&card.caption, width), width),
                Style::default().fg(card.accent),
            ),
        )
    }

    fn grid(&mut self, cards: &[CharacterCard], indent: usize) {
        let cell = CARD_WIDTH - 2;
        for row in cards.chunks(self.ctx.columns.max(1)) {
            if self
                .ctx
                .cursor
                .is_some_and(|cursor| row.iter().any(|card| card.id == cursor))
            {
                self.out.cursor_line = Some(self.out.lines.len());
            }
            let mut names = Vec::new();
            let mut captions = Vec::new();
            for card in row {
                let (name, caption) = self.card_spans(card, cell);
                names.extend([name, Span::raw("  ")]);
                captions.extend([caption, Span::raw("  ")]);
            }
            self.push(indent, names);
            self.push(indent, captions);
            self.blank();
        }
    }

    fn strip(&mut self, cards: &[CharacterCard], indent: usize) {
        let capacity = strip_capacity(self.inner_width(indent));
        let offset = self.ctx.strip_offset.min(cards.len().saturating_sub(1));
        let shown = &cards[offset..cards.len().min(offset + capacity)];
        let marker = Style::default().fg(TEXT_DIM);
        let before = if offset > 0 { "‹ " } else { "  " };
        let after = if offset + shown.len() < cards.len() { "›" } else { " " };

        let mut names = vec![Span::styled(before, marker)];
        let mut captions = vec![Span::raw("  ")];
        for card in shown {
            let (name, caption) = self.card_spans(card, CARD_WIDTH - 2);
            names.extend([name, Span::raw("  ")]);
            captions.extend([caption, Span::raw("  ")]);
        }
        names.push(Span::styled(after, marker));
        self.push(indent, names);
        self.push(indent, captions);
        self.push(
            indent,
            vec![Span::styled(
                format!("  {}/{}", (offset + shown.len()).min(cards.len()), cards.len()),
                marker,
            )],
        );
        self.blank();
    }

    fn tier_row(&mut self, label: &str, color: Color, members: &[CharacterCard], indent: usize) {
        const LABEL_WIDTH: usize = 5;
        let label_style = Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD);
        let width = self.inner_width(indent + LABEL_WIDTH + 1);

        let mut rows: Vec<Vec<Span<'static>>> = vec![Vec::new()];
        let mut used = 0;
        let mut cursor_row = None;
        for card in members {
            let chip = format!("{} ", card.name);
            let chip_width = text_width(&chip);
            if used > 0 && used + chip_width > width {
                rows.push(Vec::new());
                used = 0;
            }
            let mut style = Style::default().fg(card.accent);
            if self.ctx.cursor == Some(card.id.as_str()) {
                style = style.add_modifier(Modifier::REVERSED);
                cursor_row = Some(rows.len() - 1);
            }
            if let Some(row) = rows.last_mut() {
                row.push(Span::styled(truncate(&card.name, width), style));
                row.push(Span::raw(" "));
            }
            used += chip_width;
        }

        let start = self.out.lines.len();
        for (index, row) in rows.into_iter().enumerate() {
            let head = if index == 0 {
                Span::styled(pad(&format!(" {label}"), LABEL_WIDTH), label_style)
            } else {
                Span::raw(" ".repeat(LABEL_WIDTH))
            };
            let mut spans = vec![head, Span::raw(" ")];
            spans.extend(row);
            self.push(indent, spans);
        }
        if let Some(row) = cursor_row {
            self.out.cursor_line = Some(start + row);
        }
        self.blank();
    }
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Primary => Style::default().fg(TEXT_MAIN),
        Tone::Secondary => Style::default().fg(TEXT_SECONDARY),
        Tone::Dim => Style::default().fg(TEXT_DIM),
        Tone::Accent(color) => Style::default().fg(color).add_modifier(Modifier::BOLD),
    }
}

fn choice_key<T: PartialEq + Clone>(
    choice: &Choice<T>,
    code: impl Fn(&T) -> &str,
) -> Option<String> {
    choice.value().map(|value| code(value).to_string())
}

/// Label of the option matching `key`; the ALL option when nothing matches.
fn selected_label(options: &[SelectOption], key: Option<String>) -> String {
    options
        .iter()
        .find(|option| option.key == key)
        .or_else(|| options.first())
        .map(|option| option.label.clone())
        .unwrap_or_default()
}

fn text_width(text: &str) -> usize {
    Span::raw(text).width()
}

fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let w = text_width(ch.encode_utf8(&mut buf));
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text_width(text));
    format!("{text}{}", " ".repeat(fill))
}

/// Word wrap by display width. Words longer than a line are hard-split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw in text.lines() {
        let mut line = String::new();
        let mut used = 0;
        for word in raw.split_whitespace() {
            let word_width = text_width(word);
            if used > 0 && used + 1 + word_width <= width {
                line.push(' ');
                line.push_str(word);
                used += 1 + word_width;
                continue;
            }
            if used > 0 {
                out.push(std::mem::take(&mut line));
                used = 0;
            }
            if word_width <= width {
                line.push_str(word);
                used = word_width;
            } else {
                let mut buf = [0u8; 4];
                for ch in word.chars() {
                    let w = text_width(ch.encode_utf8(&mut buf));
                    if used + w > width {
                        out.push(std::mem::take(&mut line));
                        used = 0;
                    }
                    line.push(ch);
                    used += w;
                }
            }
        }
        out.push(line);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}
