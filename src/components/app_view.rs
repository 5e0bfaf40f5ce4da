use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::paint::{self, PaintContext};
use super::Component;
use crate::action::Action;
use crate::catalog::Position;
use crate::dispatch::{RenderPlan, Surface};
use crate::focus;
use crate::provider::failure_message;
use crate::router::Route;
use crate::selection::{self, FilterUpdate};
use crate::state::{AppState, Snapshot};
use crate::view::palette::{
    ACCENT_CYAN, BG_BASE, BG_PANEL, ERROR_RED, TEXT_DIM, TEXT_MAIN, TEXT_SECONDARY,
};

const PAGE: i16 = 10;

pub struct AppViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: route tabs, the active view and the status bar.
///
/// Owns the render surface, so scroll offsets survive partial renders.
pub struct AppView {
    surface: Surface,
    cursor: usize,
    columns: usize,
    follow_cursor: bool,
    status_bar: StatusBar,
}

impl Default for AppView {
    fn default() -> Self {
        Self {
            surface: Surface::new(),
            cursor: 0,
            columns: 1,
            follow_cursor: false,
            status_bar: StatusBar::new(),
        }
    }
}

impl AppView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Id of the card under the cursor, if the view has selectable cards.
    pub fn cursor_card(&self) -> Option<&str> {
        self.surface
            .tree()
            .and_then(|tree| tree.selectable_cards().get(self.cursor).copied())
            .map(|card| card.id.as_str())
    }

    fn move_cursor(&mut self, delta: isize) -> Option<Action> {
        let count = self
            .surface
            .tree()
            .map(|tree| tree.selectable_cards().len())
            .unwrap_or(0);
        if count == 0 {
            return None;
        }
        let next = self.cursor.saturating_add_signed(delta).min(count - 1);
        if next == self.cursor {
            return None;
        }
        self.cursor = next;
        self.follow_cursor = true;
        Some(Action::Render)
    }

    fn scroll(&mut self, delta: i16) -> Option<Action> {
        self.surface.scroll_by(delta);
        Some(Action::Render)
    }

    fn handle_view_key(&mut self, code: KeyCode, snapshot: &Snapshot<'_>) -> Option<Action> {
        let route = snapshot.route;
        let filtered = route.filtered_region().is_some();
        match code {
            KeyCode::Char(digit @ '1'..='4') => {
                let index = digit as usize - '1' as usize;
                Route::ALL.get(index).copied().map(Action::RouteSet)
            }
            KeyCode::Tab => Some(Action::RouteNext),
            KeyCode::Char('l') | KeyCode::Char('L') => Some(Action::LanguageCycle),
            KeyCode::Char('/') if filtered => Some(Action::SearchOpen),
            KeyCode::Char('p') if route != Route::Home => Some(Action::FilterSet(
                FilterUpdate::Position(snapshot.filter.position.cycle(&Position::ALL)),
            )),
            KeyCode::Char('g') if filtered => {
                let grades = selection::grade_options(snapshot.library.characters());
                Some(Action::FilterSet(FilterUpdate::Grade(
                    snapshot.filter.grade.cycle(&grades),
                )))
            }
            KeyCode::PageDown => self.scroll(PAGE),
            KeyCode::PageUp => self.scroll(-PAGE),
            KeyCode::Left | KeyCode::Right if route == Route::Guide => {
                let step = if code == KeyCode::Left { -1 } else { 1 };
                focus::step(snapshot.focus, &snapshot.visible(), step)
                    .filter(|id| !snapshot.focus.is_on(id))
                    .map(Action::FocusSelect)
            }
            KeyCode::Up | KeyCode::Down if matches!(route, Route::Home | Route::Guide) => {
                self.scroll(if code == KeyCode::Up { -1 } else { 1 })
            }
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up | KeyCode::Down => {
                let rows = if route == Route::Characters {
                    self.columns as isize
                } else {
                    1
                };
                self.move_cursor(if code == KeyCode::Up { -rows } else { rows })
            }
            KeyCode::Enter => self
                .cursor_card()
                .map(|id| Action::FocusSelect(id.to_string())),
            _ => None,
        }
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>) {
        let plan = self.surface.commit(snapshot);
        if matches!(plan, RenderPlan::Full { reset_scroll: true }) {
            self.cursor = 0;
        }

        let inner = area.inner(Margin::new(1, 0));
        let width = usize::from(inner.width);
        self.columns = paint::columns_for(inner.width);

        let (cursor, strip_offset) = {
            let Some(tree) = self.surface.tree() else {
                return;
            };
            let cards = tree.selectable_cards();
            if self.cursor >= cards.len() {
                self.cursor = cards.len().saturating_sub(1);
            }
            let cursor = cards.get(self.cursor).map(|card| card.id.clone());
            let strip_offset = tree
                .cards()
                .iter()
                .position(|card| card.highlighted)
                .map(|index| paint::follow_strip(self.surface.strip_offset(), index, width))
                .unwrap_or(self.surface.strip_offset());
            (cursor, strip_offset)
        };
        self.surface.set_strip_offset(strip_offset);

        let Some(tree) = self.surface.tree() else {
            return;
        };
        let painted = paint::paint(
            tree,
            snapshot,
            &PaintContext {
                width,
                columns: self.columns,
                cursor: cursor.as_deref(),
                strip_offset,
            },
        );

        let total = u16::try_from(painted.lines.len()).unwrap_or(u16::MAX);
        let mut scroll = self.surface.scroll();
        if std::mem::take(&mut self.follow_cursor) {
            if let Some(line) = painted.cursor_line {
                let line = u16::try_from(line).unwrap_or(u16::MAX);
                if line < scroll {
                    scroll = line;
                } else if line.saturating_add(2) > scroll.saturating_add(inner.height) {
                    scroll = line.saturating_add(2).saturating_sub(inner.height);
                }
            }
        }
        scroll = scroll.min(total.saturating_sub(1));
        self.surface.set_scroll(scroll);

        frame.render_widget(Paragraph::new(painted.lines).scroll((scroll, 0)), inner);
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = status_hints(state);
        let language = Span::styled(
            state.language().to_uppercase(),
            Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD),
        );
        let items = [StatusBarItem::span(language)];
        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&items),
            style: StatusBarStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: Some(BG_PANEL),
                    fg: Some(TEXT_MAIN),
                },
                text: Style::default().fg(TEXT_DIM),
                hint_key: Style::default()
                    .fg(ACCENT_CYAN)
                    .add_modifier(Modifier::BOLD),
                hint_label: Style::default().fg(TEXT_DIM),
                separator: Style::default().fg(TEXT_DIM),
            },
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }
}

impl Component<Action> for AppView {
    type Props<'a> = AppViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
        match props.state.snapshot() {
            _ if quit => Some(Action::Quit),
            Some(snapshot) => self.handle_view_key(key.code, &snapshot),
            None => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let chunks = Layout::vertical([
            Constraint::Length(2), // Route tabs + indicator
            Constraint::Min(1),    // View
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        render_nav(frame, chunks[0], props.state);
        match props.state.snapshot() {
            Some(snapshot) => self.render_content(frame, chunks[1], &snapshot),
            None => match props.state.library_resource().error() {
                Some(error) => render_failure(frame, chunks[1], error),
                None => render_loader(frame, chunks[1]),
            },
        }
        self.render_status(frame, chunks[2], props.state);
    }
}

fn render_nav(frame: &mut Frame, area: Rect, state: &AppState) {
    let texts = state.texts();
    let labels: Vec<String> = Route::ALL
        .iter()
        .map(|route| {
            let (key, default) = route.label();
            format!(" {} {} ", route.index() + 1, texts.or(key, default))
        })
        .collect();

    let mut constraints: Vec<Constraint> = labels
        .iter()
        .map(|label| {
            let width = Line::from(label.as_str()).width();
            Constraint::Length(u16::try_from(width).unwrap_or(u16::MAX))
        })
        .collect();
    constraints.push(Constraint::Min(0));
    let tabs_row = Rect { height: 1, ..area };
    let tabs = Layout::horizontal(constraints).spacing(1).split(tabs_row);

    for (index, (label, rect)) in labels.iter().zip(tabs.iter()).enumerate() {
        let style = if index == state.route().index() {
            Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_SECONDARY)
        };
        frame.render_widget(Paragraph::new(label.as_str()).style(style), *rect);
    }
    if let Some(brand) = tabs.last() {
        frame.render_widget(
            Paragraph::new("TSCG GUIDE ")
                .style(Style::default().fg(TEXT_DIM))
                .alignment(Alignment::Right),
            *brand,
        );
    }

    // Indicator follows the active tab's laid-out geometry, when there is one.
    if area.height > 1 {
        if let Some(tab) = tabs.get(state.route().index()) {
            let indicator = Rect {
                x: tab.x,
                y: area.y + 1,
                width: tab.width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new("▔".repeat(usize::from(tab.width)))
                    .style(Style::default().fg(ACCENT_CYAN)),
                indicator,
            );
        }
    }
}

fn render_loader(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::default(),
        Line::styled(
            "THE SPIKE CROSS GUIDE",
            Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD),
        ),
        Line::styled("Loading...", Style::default().fg(TEXT_DIM)),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Fixed failure screen. Never localized, never touches a view renderer.
fn render_failure(frame: &mut Frame, area: Rect, error: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ERROR_RED));
    let text = Paragraph::new(vec![
        Line::default(),
        Line::styled(
            failure_message(error),
            Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
        ),
    ])
    .alignment(Alignment::Center)
    .wrap(ratatui::widgets::Wrap { trim: true })
    .block(block);
    frame.render_widget(text, area.inner(Margin::new(2, 1)));
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.snapshot().is_none() {
        return vec![StatusBarHint::new("q", "Quit")];
    }
    let mut hints = vec![
        StatusBarHint::new("1-4", "View"),
        StatusBarHint::new("L", "Lang"),
    ];
    match state.route() {
        Route::Home => hints.push(StatusBarHint::new("↑↓", "Scroll")),
        Route::Characters => hints.extend([
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("p/g", "Filter"),
            StatusBarHint::new("Enter", "Guide"),
        ]),
        Route::Guide => hints.extend([
            StatusBarHint::new("←→", "Character"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("p/g", "Filter"),
        ]),
        Route::TierList => hints.extend([
            StatusBarHint::new("p", "Position"),
            StatusBarHint::new("Enter", "Guide"),
        ]),
    }
    hints.push(StatusBarHint::new("q", "Quit"));
    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_quit_works_before_load() {
        let mut view = AppView::new();
        let state = AppState::default();
        let actions: Vec<_> = view
            .handle_event(
                &EventKind::Key(key("q")),
                AppViewProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_view_keys_ignored_before_load() {
        let mut view = AppView::new();
        let state = AppState::default();
        let actions: Vec<_> = view
            .handle_event(
                &EventKind::Key(key("2")),
                AppViewProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_loader() {
        let mut render = RenderHarness::new(60, 12);
        let mut view = AppView::new();
        let mut state = AppState::default();
        state.begin_loading();

        let output = render.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                AppViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });
        assert!(output.contains("Loading..."));
        assert!(view.surface().tree().is_none());
    }
}
