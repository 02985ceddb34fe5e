use std::time::Instant;

use ratatui::widgets::ListState;
use rpick_api::PickerOutcome;
use rpick_tui::{SearchInput, Theme};
use throbber_widgets_tui::ThrobberState;

use crate::dependent::DependentOptions;
use crate::picker::RemoteSearchPicker;

/// Which field receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Picker,
    Dependent,
}

/// A terminal form hosting one picker and an optional dependent select.
#[derive(Debug)]
pub struct App {
    pub(crate) picker: RemoteSearchPicker,
    pub(crate) input: SearchInput<'static>,
    pub(crate) dependent: Option<DependentOptions>,
    pub(crate) focus: Focus,
    pub(crate) title: String,
    pub(crate) dependent_title: String,
    pub theme: Theme,
    pub(crate) throbber_state: ThrobberState,
    pub(crate) list_state: ListState,
    /// Menu rows visible during the last draw.
    pub(crate) menu_viewport: usize,
}

impl App {
    pub(crate) fn new(picker: RemoteSearchPicker, dependent: Option<DependentOptions>) -> Self {
        let mut input = SearchInput::new(picker.elements().text.value());
        let theme = Theme::default();
        input.set_placeholder(&picker.config().messages.placeholder, theme.empty_style());
        Self {
            picker,
            input,
            dependent,
            focus: Focus::Picker,
            title: String::from("Search"),
            dependent_title: String::from("Options"),
            theme,
            throbber_state: ThrobberState::default(),
            list_state: ListState::default(),
            menu_viewport: usize::from(super::MENU_ROWS),
        }
    }

    pub fn picker(&self) -> &RemoteSearchPicker {
        &self.picker
    }

    pub fn dependent(&self) -> Option<&DependentOptions> {
        self.dependent.as_ref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Whether any request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.picker.state().loading
            || self
                .dependent
                .as_ref()
                .is_some_and(|dependent| dependent.state() == &crate::OptionsState::Loading)
    }

    /// Fire due debounces, apply finished requests and forward selection
    /// changes to the dependent select. A cleared change empties it again.
    pub fn pump(&mut self, now: Instant) {
        self.picker.tick(now);
        self.picker.pump();
        self.forward_changes();
        if let Some(dependent) = self.dependent.as_mut() {
            dependent.pump();
        }
        if self.is_loading() {
            self.throbber_state.calc_next();
        }
    }

    pub(crate) fn forward_changes(&mut self) {
        for change in self.picker.drain_changes() {
            if let Some(dependent) = self.dependent.as_mut() {
                dependent.load(&change.value);
            }
        }
    }

    /// Pull text the picker wrote itself, such as a committed name, into the editor.
    pub(crate) fn sync_input(&mut self) {
        let value = self.picker.elements().text.value();
        if self.input.text() != value {
            self.input.set_text(value);
        }
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) {
        self.input
            .set_placeholder(&self.picker.config().messages.placeholder, theme.empty_style());
        self.theme = theme;
    }

    pub(crate) fn outcome(&self, accepted: bool) -> PickerOutcome {
        let query = self.picker.elements().text.value().to_string();
        if !accepted {
            return PickerOutcome::cancelled(query);
        }
        PickerOutcome {
            accepted,
            query,
            value: self.picker.hidden_value().to_string(),
            selection: self.picker.selection().cloned(),
            dependent: self
                .dependent
                .as_ref()
                .and_then(|dependent| dependent.selected_option().cloned()),
        }
    }
}
