//! Single-line search field backed by `tui-textarea`.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tui_textarea::{CursorMove, TextArea};

/// The editable query. Keys that would add a second line are refused.
#[derive(Debug, Clone)]
pub struct SearchInput<'a> {
    textarea: TextArea<'a>,
    placeholder: String,
    placeholder_style: Style,
    focused: bool,
}

impl<'a> SearchInput<'a> {
    pub fn new(initial: &str) -> Self {
        let mut input = Self {
            textarea: TextArea::default(),
            placeholder: String::new(),
            placeholder_style: Style::default(),
            focused: true,
        };
        input.set_text(initial);
        input
    }

    /// Current text of the field.
    pub fn text(&self) -> &str {
        self.textarea.lines().first().map_or("", String::as_str)
    }

    /// Replace the text and park the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        let line = text.replace(['\r', '\n'], " ");
        self.textarea = TextArea::from([line]);
        self.textarea.move_cursor(CursorMove::End);
        self.apply_styles();
    }

    pub fn set_placeholder(&mut self, text: &str, style: Style) {
        self.placeholder = text.to_string();
        self.placeholder_style = style;
        self.apply_styles();
    }

    /// Hide the cursor while another field has focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.apply_styles();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Feed a key to the editor. Returns `true` when the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let newline = key.code == KeyCode::Enter
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('m'));
        if newline {
            return false;
        }
        self.textarea.input(key)
    }

    pub fn render_textarea(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }

    fn apply_styles(&mut self) {
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea.set_placeholder_text(self.placeholder.clone());
        self.textarea.set_placeholder_style(self.placeholder_style);
        let cursor = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor);
    }
}

impl Default for SearchInput<'_> {
    fn default() -> Self {
        Self::new("")
    }
}
