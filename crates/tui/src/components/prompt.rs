use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::input::SearchInput;
use crate::theme::Theme;

/// Everything needed to draw the picker's text field.
pub struct PromptView<'a> {
    pub title: &'a str,
    pub input: &'a SearchInput<'a>,
    /// Show the spinner while a request is outstanding.
    pub loading: bool,
    pub focused: bool,
}

/// Render the bordered text field with the editor inside.
pub fn render_prompt(
    frame: &mut Frame,
    area: Rect,
    view: &PromptView<'_>,
    throbber_state: &ThrobberState,
    theme: &Theme,
) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(view.focused))
        .title(Span::styled(view.title.to_string(), theme.prompt));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    view.input.render_textarea(frame, inner);

    if view.loading {
        render_spinner(frame, inner, throbber_state, theme);
    }
}

fn render_spinner(frame: &mut Frame, area: Rect, state: &ThrobberState, theme: &Theme) {
    if area.width < 2 || area.height == 0 {
        return;
    }
    let muted = theme.empty_style();
    let spinner = Throbber::default()
        .style(muted)
        .throbber_style(muted)
        .to_symbol_span(state);
    let line = Line::from(spinner);
    let width = u16::try_from(line.width()).unwrap_or(area.width).min(area.width);
    let x = area.right().saturating_sub(width);
    frame.buffer_mut().set_line(x, area.top(), &line, width);
}
