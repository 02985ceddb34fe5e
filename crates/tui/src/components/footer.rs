use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme::Theme;

/// Key hints on the left, the value the form would submit on the right.
pub fn render_footer(frame: &mut Frame, area: Rect, hints: &str, value: &str, theme: &Theme) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(hints.to_string()).style(theme.header), area);

    let value_line = Line::from(vec![
        Span::styled("value: ", theme.header),
        Span::styled(
            if value.is_empty() { "-".to_string() } else { value.to_string() },
            theme.header.patch(theme.highlight),
        ),
    ]);
    let width = u16::try_from(value_line.width()).unwrap_or(area.width).min(area.width);
    let x = area.right().saturating_sub(width);
    frame.buffer_mut().set_line(x, area.top(), &value_line, width);
}
