use thiserror::Error;

/// Failures while fetching a page. All of them are recoverable: the picker
/// resets to an empty list and shows its "could not load" message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (connection, DNS, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: u16 },

    /// The body could not be decoded as JSON.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Raised when a host form tries to submit without a valid picker value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{message}")]
    SelectionRequired { message: String },
}

/// Invalid picker configuration detected before binding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PickerConfigError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    #[error("result field must not be empty")]
    EmptyResultField,
}
