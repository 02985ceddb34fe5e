use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::theme::Theme;

/// A closed select showing its current label.
pub struct SelectView<'a> {
    pub title: &'a str,
    pub label: &'a str,
    pub enabled: bool,
    pub focused: bool,
}

pub fn render_select(frame: &mut Frame, area: Rect, view: &SelectView<'_>, theme: &Theme) {
    if area.width < 3 || area.height < 3 {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(view.focused))
        .title(Span::styled(view.title.to_string(), theme.prompt));

    let style = if view.enabled {
        ratatui::style::Style::new()
    } else {
        theme.empty_style()
    };
    let arrows = if view.enabled { "◂ ▸ " } else { "" };
    let line = Line::from(vec![
        Span::styled(arrows, theme.empty_style()),
        Span::styled(view.label.to_string(), style),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}
