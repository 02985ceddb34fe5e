//! Terminal host for a picker form.
//!
//! [`PickerUi`] binds one picker, and optionally a dependent select, to a
//! ratatui form. The event loop pumps the picker, draws the widgets from
//! `rpick-tui` and translates key presses into picker events.

mod actions;
mod builder;
mod render;
mod runtime;
mod state;

pub use builder::{FORM_PICKER_ID, FORM_VALUE_FIELD, PickerUi};
pub use runtime::run;
pub use state::{App, Focus};

/// Rows the open menu occupies.
pub(crate) const MENU_ROWS: u16 = 8;
/// Scroll units per menu row, matching the picker's default threshold.
pub(crate) const ROW_UNITS: u32 = 18;
