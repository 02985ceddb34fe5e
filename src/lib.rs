//! Remote search pickers for terminal forms.
//!
//! The root module re-exports the picker runtime, the HTTP transport and the
//! shared types from `rpick-api` so embedders can bind a picker without digging
//! through the module hierarchy. The `ui` module hosts a single picker form in
//! the terminal and backs the `rpick` binary.

pub mod app_dirs;
pub mod dependent;
pub mod logging;
pub mod picker;
mod systems;
pub mod ui;

pub use dependent::{DependentConfig, DependentOptions, OptionsState};
pub use picker::{
    PickerAnchors, PickerChange, PickerElements, PickerEvent, PickerRegistry, PickerState,
    RemoteSearchPicker, ScrollMetrics, TextField,
};
pub use systems::http::{HttpTransport, REQUESTED_WITH};
pub use ui::{PickerUi, run};

pub use rpick_api::{
    CommitField, FetchError, Item, ItemId, JsonTransport, Locale, Messages, OptionEntry,
    PickerConfig, PickerOutcome, SearchPage, SearchRequest, SubmitError, SubmitPolicy,
};
pub use rpick_tui::theme::{Theme, default_theme};
