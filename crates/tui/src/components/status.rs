use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme::Theme;

/// How a status message should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Info,
    Error,
}

/// Render a single muted or error-colored line.
pub fn render_status(frame: &mut Frame, area: Rect, text: &str, tone: Tone, theme: &Theme) {
    if area.height == 0 || text.is_empty() {
        return;
    }
    let style = match tone {
        Tone::Info => theme.empty_style(),
        Tone::Error => theme.error_style(),
    };
    let line = Line::from(Span::styled(format!(" {text}"), style));
    frame.render_widget(Paragraph::new(line), area);
}
