//! Shared data types for the `rpick` remote search picker.
//!
//! Everything in this crate is free of I/O: the picker runtime, the terminal
//! host and any embedder agree on these types and on the [`JsonTransport`]
//! seam, while the actual HTTP client lives in the root crate.

pub mod config;
pub mod error;
pub mod messages;
pub mod transport;
pub mod types;

pub use config::{CommitField, PickerConfig, SubmitPolicy};
pub use error::{FetchError, PickerConfigError, SubmitError};
pub use messages::{Locale, Messages};
pub use transport::JsonTransport;
pub use types::{
    Item, ItemId, OptionEntry, PickerOutcome, SearchPage, SearchRequest, is_truthy,
};
