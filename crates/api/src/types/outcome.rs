use super::{Item, OptionEntry};

/// Result of running an interactive picker form to completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickerOutcome {
    /// `false` when the user cancelled the form.
    pub accepted: bool,
    /// Text of the visible field when the form closed.
    pub query: String,
    /// Value of the hidden field, i.e. what a form submission carries.
    pub value: String,
    /// The item most recently chosen from the menu, if any.
    pub selection: Option<Item>,
    /// The option chosen in the dependent select, if one is configured.
    pub dependent: Option<OptionEntry>,
}

impl PickerOutcome {
    pub fn cancelled(query: impl Into<String>) -> Self {
        Self {
            accepted: false,
            query: query.into(),
            ..Self::default()
        }
    }
}
