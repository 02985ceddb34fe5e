use std::time::Instant;

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rpick_api::PickerOutcome;

use super::state::{App, Focus};
use super::ROW_UNITS;
use crate::picker::{PickerEvent, ScrollMetrics};

impl App {
    /// React to a key press. Returns the outcome once the form is submitted
    /// or cancelled.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<Option<PickerOutcome>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(self.outcome(false)));
        }

        match key.code {
            KeyCode::Esc => {
                if self.picker.is_open() {
                    self.picker.close();
                } else {
                    return Ok(Some(self.outcome(false)));
                }
            }
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(now),
            KeyCode::Enter => {
                let outcome = self.enter();
                self.sync_input();
                return Ok(outcome);
            }
            _ => match self.focus {
                Focus::Picker => self.picker_key(key, now),
                Focus::Dependent => self.dependent_key(key),
            },
        }
        Ok(None)
    }

    fn enter(&mut self) -> Option<PickerOutcome> {
        if self.focus == Focus::Picker && self.picker.is_open() && self.picker.choose_highlighted() {
            return None;
        }
        match self.picker.validate_submit() {
            Ok(_) => Some(self.outcome(true)),
            Err(err) => {
                tracing::debug!(%err, "submission blocked");
                self.picker.close();
                self.set_focus(Focus::Picker);
                None
            }
        }
    }

    fn toggle_focus(&mut self, now: Instant) {
        if self.dependent.is_none() {
            return;
        }
        let next = match self.focus {
            Focus::Picker => {
                self.picker.handle(PickerEvent::ClickOutside, now);
                Focus::Dependent
            }
            Focus::Dependent => {
                self.picker.handle(PickerEvent::Focus, now);
                Focus::Picker
            }
        };
        self.set_focus(next);
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.input.set_focused(focus == Focus::Picker);
    }

    fn picker_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Up => self.step(-1, now),
            KeyCode::Down => self.step(1, now),
            KeyCode::PageUp => self.step(-self.page_step(), now),
            KeyCode::PageDown => self.step(self.page_step(), now),
            _ => {
                if self.input.input(key) {
                    let text = self.input.text().to_string();
                    self.picker.handle(PickerEvent::Input(text), now);
                }
            }
        }
    }

    fn dependent_key(&mut self, key: KeyEvent) {
        let Some(dependent) = self.dependent.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Left => dependent.select_prev(),
            KeyCode::Down | KeyCode::Right | KeyCode::Char(' ') => dependent.select_next(),
            _ => {}
        }
    }

    fn page_step(&self) -> isize {
        isize::try_from(self.menu_viewport.max(1)).unwrap_or(1)
    }

    /// Move the highlight, opening the menu first, and report the resulting
    /// scroll position so the picker can fetch the next page.
    fn step(&mut self, delta: isize, now: Instant) {
        if !self.picker.is_open() {
            if self.picker.elements().options.is_empty() {
                self.picker.handle(PickerEvent::Click, now);
            } else {
                self.picker.open();
            }
        }
        self.picker.move_highlight(delta);
        if let Some(metrics) = self.scroll_metrics() {
            self.picker.handle(PickerEvent::Scroll(metrics), now);
        }
    }

    /// Scroll metrics for the window that keeps the highlighted row in view.
    pub(crate) fn scroll_metrics(&self) -> Option<ScrollMetrics> {
        let options = &self.picker.elements().options;
        let highlighted = options.highlighted()?;
        let viewport = self.menu_viewport.max(1);
        let top = (highlighted + 1).saturating_sub(viewport);
        let units = |rows: usize| u32::try_from(rows).unwrap_or(u32::MAX).saturating_mul(ROW_UNITS);
        Some(ScrollMetrics::new(
            units(top),
            units(viewport.min(options.len())),
            units(options.len()),
        ))
    }
}
