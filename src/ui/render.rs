use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use rpick_tui::components::{
    MenuView, PromptView, SelectView, Tone, render_footer, render_menu, render_prompt,
    render_select, render_status,
};

use super::MENU_ROWS;
use super::state::{App, Focus};

const HINTS: &str = " ↑↓ move  enter choose  tab switch  esc close";

impl App {
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 0,
            horizontal: 1,
        });

        let menu_height = if self.picker.is_open() && !self.picker.elements().options.is_empty() {
            MENU_ROWS + 1
        } else {
            0
        };
        let select_height = if self.dependent.is_some() { 3 } else { 0 };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(menu_height),
                Constraint::Length(1),
                Constraint::Length(select_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_picker(frame, layout[0], layout[1]);
        self.render_status_line(frame, layout[2]);
        self.render_dependent(frame, layout[3]);
        render_footer(
            frame,
            layout[5],
            HINTS,
            self.picker.hidden_value(),
            &self.theme,
        );
    }

    fn render_picker(&mut self, frame: &mut Frame, prompt_area: Rect, menu_area: Rect) {
        let view = PromptView {
            title: &self.title,
            input: &self.input,
            loading: self.picker.state().loading,
            focused: self.focus == Focus::Picker,
        };
        render_prompt(frame, prompt_area, &view, &self.throbber_state, &self.theme);

        let elements = self.picker.elements();

        if menu_area.height == 0 {
            return;
        }
        let menu = MenuView {
            rows: elements.options.rows(),
            highlighted: elements.options.highlighted(),
            query: elements.text.value(),
        };
        self.menu_viewport = render_menu(frame, menu_area, &menu, &mut self.list_state, &self.theme);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let elements = self.picker.elements();
        if let Some(message) = elements.text.validity()
            && !self.picker.is_open()
        {
            render_status(frame, area, message, Tone::Error, &self.theme);
            return;
        }
        let status = elements.status.text();
        let tone = if status == self.picker.config().messages.load_failed {
            Tone::Error
        } else {
            Tone::Info
        };
        render_status(frame, area, status, tone, &self.theme);
    }

    fn render_dependent(&self, frame: &mut Frame, area: Rect) {
        let Some(dependent) = self.dependent.as_ref() else {
            return;
        };
        let view = SelectView {
            title: &self.dependent_title,
            label: dependent.label(),
            enabled: dependent.is_enabled(),
            focused: self.focus == Focus::Dependent,
        };
        render_select(frame, area, &view, &self.theme);
    }
}
