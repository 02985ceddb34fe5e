//! A select whose options depend on the value committed by a picker.
//!
//! When a company is picked, the campaigns of that company are fetched and
//! offered here. The select stays disabled while loading, after a failure and
//! when the parent has no options. Loads share the picker's stale-discard
//! rule: only the most recent load may populate the options.

use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::TryRecvError;

use indexmap::IndexMap;
use rpick_api::{FetchError, JsonTransport, Messages, OptionEntry};
use serde::Deserialize;
use serde_json::Value;

use crate::systems::fetch::{FetchResult, FetchRuntime};

pub const DEFAULT_PARENT_PARAM: &str = "company_id";
pub const DEFAULT_OPTIONS_FIELD: &str = "campaigns";

/// Where and how dependent options are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentConfig {
    pub endpoint_url: String,
    /// Query parameter carrying the parent value.
    pub parent_param: String,
    /// Response field holding the `[{id, label}]` array.
    pub result_field: String,
    pub extra_params: IndexMap<String, String>,
}

impl DependentConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            parent_param: DEFAULT_PARENT_PARAM.to_string(),
            result_field: DEFAULT_OPTIONS_FIELD.to_string(),
            extra_params: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_parent_param(mut self, param: impl Into<String>) -> Self {
        self.parent_param = param.into();
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

    /// Extra parameters first, then the parent value, which always wins.
    fn query_pairs(&self, parent: &str) -> Vec<(String, String)> {
        self.extra_params
            .iter()
            .filter(|(key, _)| **key != self.parent_param)
            .map(|(key, value)| (key.clone(), value.clone()))
            .chain(std::iter::once((self.parent_param.clone(), parent.to_string())))
            .collect()
    }
}

/// Lifecycle of the option list.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsState {
    /// No parent value; only the placeholder is shown.
    Idle,
    Loading,
    Ready(Vec<OptionEntry>),
    Failed,
}

pub struct DependentOptions {
    config: DependentConfig,
    messages: Messages,
    state: OptionsState,
    parent: Option<String>,
    selected: Option<usize>,
    generation: u64,
    runtime: FetchRuntime<Vec<OptionEntry>>,
}

impl fmt::Debug for DependentOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependentOptions")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("parent", &self.parent)
            .field("selected", &self.selected)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl DependentOptions {
    pub fn new(config: DependentConfig, messages: Messages, transport: Arc<dyn JsonTransport>) -> Self {
        Self {
            config,
            messages,
            state: OptionsState::Idle,
            parent: None,
            selected: None,
            generation: 0,
            runtime: FetchRuntime::new(transport),
        }
    }

    pub fn config(&self) -> &DependentConfig {
        &self.config
    }

    pub fn state(&self) -> &OptionsState {
        &self.state
    }

    /// The parent value the current options belong to.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Reload the options for `parent_id`. An empty id resets to the placeholder.
    pub fn load(&mut self, parent_id: &str) {
        self.generation = self.generation.wrapping_add(1);
        self.selected = None;

        let parent_id = parent_id.trim();
        if parent_id.is_empty() {
            self.parent = None;
            self.state = OptionsState::Idle;
            return;
        }

        self.parent = Some(parent_id.to_string());
        self.state = OptionsState::Loading;

        let url = self.config.endpoint_url.clone();
        let query = self.config.query_pairs(parent_id);
        let field = self.config.result_field.clone();
        tracing::debug!(parent = parent_id, generation = self.generation, "loading dependent options");
        self.runtime.dispatch(self.generation, move |transport| {
            let body = transport.get_json(&url, &query)?;
            Ok(parse_options(&body, &field))
        });
    }

    /// Apply finished loads. Returns how many were accepted.
    pub fn pump(&mut self) -> usize {
        let mut accepted = 0;
        loop {
            match self.runtime.try_recv() {
                Ok(result) => {
                    if self.apply(result) {
                        accepted += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        accepted
    }

    /// Whether the user may pick an option.
    pub fn is_enabled(&self) -> bool {
        matches!(&self.state, OptionsState::Ready(options) if !options.is_empty())
    }

    pub fn options(&self) -> &[OptionEntry] {
        match &self.state {
            OptionsState::Ready(options) => options,
            _ => &[],
        }
    }

    pub fn selected_option(&self) -> Option<&OptionEntry> {
        self.selected.and_then(|index| self.options().get(index))
    }

    /// Text shown in the closed select.
    pub fn label(&self) -> &str {
        match &self.state {
            OptionsState::Loading => &self.messages.loading,
            OptionsState::Failed => &self.messages.options_failed,
            OptionsState::Idle | OptionsState::Ready(_) => self
                .selected_option()
                .map_or(self.messages.placeholder.as_str(), |option| option.label.as_str()),
        }
    }

    /// Step forward through the options, wrapping back to the placeholder.
    pub fn select_next(&mut self) {
        let len = self.options().len();
        if len == 0 {
            return;
        }
        self.selected = match self.selected {
            None => Some(0),
            Some(index) if index + 1 < len => Some(index + 1),
            Some(_) => None,
        };
    }

    pub fn select_prev(&mut self) {
        let len = self.options().len();
        if len == 0 {
            return;
        }
        self.selected = match self.selected {
            None => Some(len - 1),
            Some(0) => None,
            Some(index) => Some(index - 1),
        };
    }

    fn apply(&mut self, result: FetchResult<Vec<OptionEntry>>) -> bool {
        if result.id != self.generation {
            tracing::trace!(stale = result.id, current = self.generation, "discarding stale options");
            return false;
        }
        self.state = match result.outcome {
            Ok(options) => OptionsState::Ready(options),
            Err(err) => {
                log_failure(self.parent.as_deref(), &err);
                OptionsState::Failed
            }
        };
        true
    }
}

fn log_failure(parent: Option<&str>, err: &FetchError) {
    tracing::warn!(parent = parent.unwrap_or_default(), %err, "dependent options failed to load");
}

/// Entries without an `id` are skipped; a missing label renders empty.
fn parse_options(body: &Value, field: &str) -> Vec<OptionEntry> {
    body.get(field)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| OptionEntry::deserialize(entry).ok())
                .collect()
        })
        .unwrap_or_default()
}
