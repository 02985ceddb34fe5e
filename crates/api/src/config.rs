use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::PickerConfigError;
use crate::messages::Messages;
use crate::types::{Item, SearchRequest};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_RESULT_FIELD: &str = "companies";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_SCROLL_THRESHOLD: u32 = 18;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(6);

/// Which item attribute is written into the hidden field on selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitField {
    #[default]
    Id,
    Name,
}

impl CommitField {
    pub fn value_of(self, item: &Item) -> String {
        match self {
            Self::Id => item.id.to_string(),
            Self::Name => item.name.clone(),
        }
    }
}

/// How the host form treats the hidden field on submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmitPolicy {
    /// Typing invalidates the hidden value; submission needs a chosen item.
    #[default]
    RequireSelection,
    /// The trimmed text doubles as the submitted value (filter forms).
    FreeText,
}

/// Everything a picker needs besides its anchors and transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
    pub endpoint_url: String,
    pub page_size: usize,
    pub result_field: String,
    pub extra_params: IndexMap<String, String>,
    pub commit: CommitField,
    pub submit: SubmitPolicy,
    pub debounce: Duration,
    /// Distance from the bottom of the option list, in the same units the host
    /// reports scroll metrics in, at which the next page is requested.
    pub scroll_threshold: u32,
    /// `None` disables the client-side timeout.
    pub request_timeout: Option<Duration>,
    pub messages: Messages,
}

impl PickerConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            result_field: DEFAULT_RESULT_FIELD.to_string(),
            extra_params: IndexMap::new(),
            commit: CommitField::default(),
            submit: SubmitPolicy::default(),
            debounce: DEFAULT_DEBOUNCE,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            messages: Messages::default(),
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_result_field(mut self, field: impl Into<String>) -> Self {
        self.result_field = field.into();
        self
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_commit(mut self, commit: CommitField) -> Self {
        self.commit = commit;
        self
    }

    #[must_use]
    pub fn with_submit(mut self, submit: SubmitPolicy) -> Self {
        self.submit = submit;
        self
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn with_scroll_threshold(mut self, threshold: u32) -> Self {
        self.scroll_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Whether the endpoint anchor is present at all.
    pub fn has_endpoint(&self) -> bool {
        !self.endpoint_url.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), PickerConfigError> {
        if self.page_size == 0 {
            return Err(PickerConfigError::ZeroPageSize);
        }
        if self.result_field.trim().is_empty() {
            return Err(PickerConfigError::EmptyResultField);
        }
        Ok(())
    }

    /// Build the request for `query` starting at `offset`.
    pub fn request(&self, query: &str, offset: usize) -> SearchRequest {
        SearchRequest::new(query, offset, self.page_size).with_extra_params(self.extra_params.clone())
    }
}
