use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use rpick_api::Item;

use super::highlight::highlight_spans;
use crate::theme::Theme;

/// The open dropdown of a picker.
pub struct MenuView<'a> {
    pub rows: &'a [Item],
    pub highlighted: Option<usize>,
    /// Current text of the field, highlighted inside each row.
    pub query: &'a str,
}

/// Render the rows and return how many fit in the viewport.
pub fn render_menu(
    frame: &mut Frame,
    area: Rect,
    view: &MenuView<'_>,
    list_state: &mut ListState,
    theme: &Theme,
) -> usize {
    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
        .border_style(theme.border_style(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return 0;
    }

    let items: Vec<ListItem<'_>> = view
        .rows
        .iter()
        .map(|item| ListItem::new(Line::from(row_spans(item, view.query, theme))))
        .collect();
    let list = List::new(items)
        .highlight_style(theme.row_highlight)
        .highlight_symbol("› ");

    list_state.select(view.highlighted);
    frame.render_stateful_widget(list, inner, list_state);

    let viewport = usize::from(inner.height);
    if view.rows.len() > viewport {
        render_scrollbar(frame, area, view.rows.len(), list_state.offset(), theme);
    }
    viewport
}

fn row_spans<'a>(item: &'a Item, query: &str, theme: &Theme) -> Vec<Span<'a>> {
    highlight_spans(&item.name, query, Style::new(), theme.highlight)
}

fn render_scrollbar(frame: &mut Frame, area: Rect, content: usize, offset: usize, theme: &Theme) {
    let track = Rect {
        x: area.right().saturating_sub(1),
        y: area.y,
        width: 1,
        height: area.height.saturating_sub(1),
    };
    let mut state = ScrollbarState::new(content).position(offset);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .track_symbol(Some("│"))
        .style(theme.empty_style());
    frame.render_stateful_widget(scrollbar, track, &mut state);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::tests::buffer_lines;
    use crate::theme::SLATE;

    fn items(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| Item::new(index as i64, *name))
            .collect()
    }

    #[test]
    fn lists_rows_and_marks_the_highlight() {
        let rows = items(&["Acme", "Acme Corp", "Beta Ltd"]);
        let mut terminal = Terminal::new(TestBackend::new(24, 5)).expect("terminal");
        let mut state = ListState::default();
        let mut viewport = 0;
        terminal
            .draw(|frame| {
                let view = MenuView {
                    rows: &rows,
                    highlighted: Some(1),
                    query: "acme",
                };
                viewport = render_menu(frame, frame.area(), &view, &mut state, &SLATE);
            })
            .expect("draw");

        let lines = buffer_lines(terminal.backend().buffer());
        assert_eq!(viewport, 4);
        assert!(lines[0].contains("Acme"));
        assert!(lines[1].contains("› Acme Corp"));
        assert!(lines[2].contains("Beta Ltd"));
    }

    #[test]
    fn long_lists_scroll_to_the_highlight() {
        let names: Vec<String> = (0..20).map(|n| format!("Company {n}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let rows = items(&refs);
        let mut terminal = Terminal::new(TestBackend::new(24, 5)).expect("terminal");
        let mut state = ListState::default();
        terminal
            .draw(|frame| {
                let view = MenuView {
                    rows: &rows,
                    highlighted: Some(19),
                    query: "",
                };
                render_menu(frame, frame.area(), &view, &mut state, &SLATE);
            })
            .expect("draw");

        assert_eq!(state.offset(), 16);
        let lines = buffer_lines(terminal.backend().buffer());
        assert!(lines[3].contains("Company 19"));
    }
}
