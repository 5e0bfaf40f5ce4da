use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::view::palette::{ACCENT_CYAN, BG_PANEL};

/// Search term editor shown while the term is being edited.
pub struct SearchBar {
    input: TextInput,
    was_open: bool,
    /// The kept term is not empty on reopen; the cursor starts after it.
    cursor_to_end: bool,
}

pub struct SearchBarProps<'a> {
    pub value: &'a str,
    pub placeholder: &'a str,
    pub is_focused: bool,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            was_open: false,
            cursor_to_end: false,
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
            self.cursor_to_end = true;
        }
        self.was_open = is_open;
    }

    fn settle_cursor(&mut self, value: &str, placeholder: &str) {
        if !std::mem::take(&mut self.cursor_to_end) || value.is_empty() {
            return;
        }
        let end = EventKind::Key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        let props = TextInputProps {
            value,
            placeholder,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: Action::SearchChange,
            on_submit: |_| Action::SearchClose,
            on_cursor_move: Some(|_| Action::Render),
        };
        // Only the cursor position matters here.
        self.input.handle_event(&end, props).into_iter().for_each(drop);
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            return vec![Action::SearchClose];
        }
        self.settle_cursor(props.value, props.placeholder);

        let input_props = TextInputProps {
            value: props.value,
            placeholder: props.placeholder,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: Action::SearchChange,
            on_submit: |_| Action::SearchClose,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT_CYAN))
            .title(" Search ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.settle_cursor(props.value, props.placeholder);

        let input_props = TextInputProps {
            value: props.value,
            placeholder: props.placeholder,
            is_focused: props.is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: Some(BG_PANEL),
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: Action::SearchChange,
            on_submit: |_| Action::SearchClose,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, inner, input_props);
    }
}
