use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail, ensure};
use indexmap::IndexMap;
use reqwest::Url;
use rpick::{CommitField, DependentConfig, Locale, Messages, PickerConfig, SubmitPolicy};
use rpick_tui::theme;
use serde::Deserialize;

use super::resolved::ResolvedConfig;
use crate::cli::CliArgs;

/// Configuration as read from files and the environment, before CLI
/// overrides and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    picker: PickerSection,
    dependent: DependentSection,
    ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PickerSection {
    endpoint_url: Option<String>,
    page_size: Option<usize>,
    result_field: Option<String>,
    extra_params: IndexMap<String, String>,
    commit: Option<CommitField>,
    submit: Option<SubmitPolicy>,
    debounce_ms: Option<u64>,
    scroll_threshold: Option<u32>,
    /// Zero disables the timeout.
    request_timeout_ms: Option<u64>,
    locale: Option<String>,
    messages: MessagesSection,
}

/// Per-string overrides on top of the locale preset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MessagesSection {
    loading: Option<String>,
    no_results: Option<String>,
    scroll_for_more: Option<String>,
    load_failed: Option<String>,
    select_from_list: Option<String>,
    placeholder: Option<String>,
    options_failed: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DependentSection {
    endpoint_url: Option<String>,
    parent_param: Option<String>,
    result_field: Option<String>,
    extra_params: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
    title: Option<String>,
    dependent_title: Option<String>,
    initial_query: Option<String>,
    theme: Option<String>,
}

impl RawConfig {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        let picker = &mut self.picker;
        if let Some(endpoint) = cli.endpoint.clone() {
            picker.endpoint_url = Some(endpoint);
        }
        if let Some(size) = cli.page_size {
            picker.page_size = Some(size);
        }
        if let Some(field) = cli.result_field.clone() {
            picker.result_field = Some(field);
        }
        for (key, value) in &cli.params {
            picker.extra_params.insert(key.clone(), value.clone());
        }
        if let Some(commit) = cli.commit {
            picker.commit = Some(commit.into());
        }
        if cli.free_text {
            picker.submit = Some(SubmitPolicy::FreeText);
        }
        if let Some(locale) = cli.locale.clone() {
            picker.locale = Some(locale);
        }
        if let Some(ms) = cli.debounce_ms {
            picker.debounce_ms = Some(ms);
        }
        if let Some(ms) = cli.timeout_ms {
            picker.request_timeout_ms = Some(ms);
        }
        if let Some(endpoint) = cli.dependent_endpoint.clone() {
            self.dependent.endpoint_url = Some(endpoint);
        }
        if let Some(title) = cli.title.clone() {
            self.ui.title = Some(title);
        }
        if let Some(query) = cli.initial_query.clone() {
            self.ui.initial_query = Some(query);
        }
        if let Some(theme) = cli.theme.clone() {
            self.ui.theme = Some(theme);
        }
    }

    pub(super) fn resolve(self) -> Result<ResolvedConfig> {
        let Self { picker, dependent, ui } = self;

        let picker = picker.resolve()?;
        let dependent = dependent.resolve()?;

        if let Some(name) = ui.theme.as_deref() {
            ensure!(
                theme::by_name(name).is_some(),
                "unknown theme `{name}` (available: {})",
                theme::names().join(", ")
            );
        }

        Ok(ResolvedConfig {
            picker,
            dependent,
            title: non_empty(ui.title),
            dependent_title: non_empty(ui.dependent_title),
            initial_query: ui.initial_query.unwrap_or_default(),
            theme: non_empty(ui.theme),
            sources: Vec::new(),
        })
    }
}

impl PickerSection {
    fn resolve(self) -> Result<PickerConfig> {
        let endpoint = non_empty(self.endpoint_url)
            .ok_or_else(|| anyhow!("no endpoint configured; pass --endpoint or set picker.endpoint_url"))?;
        check_url("picker.endpoint_url", &endpoint)?;

        let locale = match self.locale.as_deref() {
            None => Locale::default(),
            Some(tag) => match Locale::from_tag(tag) {
                Some(locale) => locale,
                None => bail!("unknown locale `{tag}` (available: en, pt-BR)"),
            },
        };
        let messages = self.messages.apply(Messages::for_locale(locale));

        let mut config = PickerConfig::new(endpoint).with_messages(messages);
        if let Some(size) = self.page_size {
            config = config.with_page_size(size);
        }
        if let Some(field) = self.result_field {
            config = config.with_result_field(field);
        }
        for (key, value) in self.extra_params {
            config = config.with_param(key, value);
        }
        if let Some(commit) = self.commit {
            config = config.with_commit(commit);
        }
        if let Some(submit) = self.submit {
            config = config.with_submit(submit);
        }
        if let Some(ms) = self.debounce_ms {
            config = config.with_debounce(Duration::from_millis(ms));
        }
        if let Some(threshold) = self.scroll_threshold {
            config = config.with_scroll_threshold(threshold);
        }
        if let Some(ms) = self.request_timeout_ms {
            let timeout = (ms > 0).then(|| Duration::from_millis(ms));
            config = config.with_request_timeout(timeout);
        }

        config.validate().context("invalid picker configuration")?;
        Ok(config)
    }
}

impl MessagesSection {
    fn apply(self, mut messages: Messages) -> Messages {
        let overrides = [
            (self.loading, &mut messages.loading),
            (self.no_results, &mut messages.no_results),
            (self.scroll_for_more, &mut messages.scroll_for_more),
            (self.load_failed, &mut messages.load_failed),
            (self.select_from_list, &mut messages.select_from_list),
            (self.placeholder, &mut messages.placeholder),
            (self.options_failed, &mut messages.options_failed),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
        messages
    }
}

impl DependentSection {
    fn resolve(self) -> Result<Option<DependentConfig>> {
        let Some(endpoint) = non_empty(self.endpoint_url) else {
            return Ok(None);
        };
        check_url("dependent.endpoint_url", &endpoint)?;

        let mut config = DependentConfig::new(endpoint);
        if let Some(param) = non_empty(self.parent_param) {
            config = config.with_parent_param(param);
        }
        if let Some(field) = non_empty(self.result_field) {
            config = config.with_result_field(field);
        }
        for (key, value) in self.extra_params {
            config = config.with_param(key, value);
        }
        Ok(Some(config))
    }
}

fn check_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{key} must be an absolute URL: `{value}`"))?;
    ensure!(
        matches!(url.scheme(), "http" | "https"),
        "{key} must use http or https: `{value}`"
    );
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
