use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use rpick_api::{JsonTransport, PickerConfig, PickerOutcome};
use rpick_tui::{Theme, theme};

use super::App;
use crate::dependent::{DependentConfig, DependentOptions};
use crate::picker::{PickerAnchors, PickerEvent, RemoteSearchPicker};
use crate::systems::http::HttpTransport;

/// Container id of the picker bound by the terminal form.
pub const FORM_PICKER_ID: &str = "rpick";
/// Name of the hidden field carrying the committed value.
pub const FORM_VALUE_FIELD: &str = "value";

/// Builder for the terminal picker form.
pub struct PickerUi {
    config: PickerConfig,
    title: Option<String>,
    dependent: Option<(DependentConfig, Option<String>)>,
    theme: Option<Theme>,
    initial_query: Option<String>,
    transport: Option<Arc<dyn JsonTransport>>,
}

impl PickerUi {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            config,
            title: None,
            dependent: None,
            theme: None,
            initial_query: None,
            transport: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a select that reloads whenever the picker commits a value.
    pub fn with_dependent(mut self, config: DependentConfig, title: Option<String>) -> Self {
        self.dependent = Some((config, title));
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Unknown names keep the current theme.
    pub fn with_theme_name(mut self, name: &str) -> Self {
        if let Some(theme) = theme::by_name(name) {
            self.theme = Some(theme);
        }
        self
    }

    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        self.initial_query = Some(query.into());
        self
    }

    /// Replace the HTTP client, e.g. with a fake in tests.
    pub fn with_transport(mut self, transport: Arc<dyn JsonTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Bind the picker and assemble the form without touching the terminal.
    pub fn build(self) -> Result<App> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                HttpTransport::new(self.config.request_timeout)
                    .context("failed to build HTTP client")?,
            ),
        };

        let messages = self.config.messages.clone();
        let mut picker = RemoteSearchPicker::initialize(
            PickerAnchors::complete(FORM_PICKER_ID, FORM_VALUE_FIELD),
            self.config,
            Arc::clone(&transport),
        )
        .ok_or_else(|| anyhow!("picker needs an endpoint URL and a positive page size"))?;

        let now = Instant::now();
        match self.initial_query.filter(|query| !query.trim().is_empty()) {
            Some(query) => picker.handle(PickerEvent::Input(query), now),
            None => picker.handle(PickerEvent::Focus, now),
        }

        let mut dependent_title = None;
        let dependent = self.dependent.map(|(config, title)| {
            dependent_title = title;
            DependentOptions::new(config, messages, Arc::clone(&transport))
        });

        let mut app = App::new(picker, dependent);
        if let Some(title) = self.title {
            app.title = title;
        }
        if let Some(title) = dependent_title {
            app.dependent_title = title;
        }
        if let Some(theme) = self.theme {
            app.set_theme(theme);
        }
        Ok(app)
    }

    /// Build the form and run it in the terminal.
    pub fn run(self) -> Result<PickerOutcome> {
        let mut app = self.build()?;
        app.run()
    }
}
