//! The remote search picker: a text field bound to a paginated endpoint.
//!
//! A [`RemoteSearchPicker`] owns its [`PickerElements`], its [`PickerState`]
//! and a fetch runtime. Hosts forward [`PickerEvent`]s, call
//! [`RemoteSearchPicker::tick`] to let the debounce fire and
//! [`RemoteSearchPicker::pump`] to apply finished requests, then render from
//! the elements. Every request is tagged with a fresh id; results for any
//! other id are discarded, so only the most recent request is ever visible.

mod debounce;
mod elements;
mod events;
mod registry;
mod state;
#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use rpick_api::{Item, JsonTransport, PickerConfig, SearchPage, SubmitError, SubmitPolicy};

use crate::systems::fetch::{FetchResult, FetchRuntime};
use debounce::Debouncer;

pub use elements::{
    AnchorId, HiddenField, Menu, OptionList, PickerAnchors, PickerElements, StatusLine, TextField,
};
pub use events::{PickerChange, PickerEvent, ScrollMetrics};
pub use registry::PickerRegistry;
pub use state::PickerState;

type SelectCallback = Box<dyn FnMut(&Item) + Send>;

/// A picker bound to its anchors.
pub struct RemoteSearchPicker {
    id: AnchorId,
    config: PickerConfig,
    state: PickerState,
    elements: PickerElements,
    debounce: Debouncer,
    runtime: FetchRuntime<SearchPage>,
    append: bool,
    selection: Option<Item>,
    on_select: Option<SelectCallback>,
    changes: Vec<PickerChange>,
}

impl fmt::Debug for RemoteSearchPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSearchPicker")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("menu_open", &self.elements.menu.is_visible())
            .finish_non_exhaustive()
    }
}

impl RemoteSearchPicker {
    /// Bind a picker to `anchors`.
    ///
    /// Returns `None` when a required region is missing, when the endpoint is
    /// blank or when the configuration is invalid. Nothing is bound in that
    /// case and the host simply renders without a picker.
    pub fn initialize(
        anchors: PickerAnchors,
        config: PickerConfig,
        transport: Arc<dyn JsonTransport>,
    ) -> Option<Self> {
        let Some((id, elements)) = anchors.resolve() else {
            tracing::debug!("picker anchors incomplete; skipping bind");
            return None;
        };
        if !config.has_endpoint() {
            tracing::debug!(picker = %id, "picker has no endpoint; skipping bind");
            return None;
        }
        if let Err(err) = config.validate() {
            tracing::warn!(picker = %id, %err, "invalid picker configuration; skipping bind");
            return None;
        }

        tracing::debug!(picker = %id, endpoint = %config.endpoint_url, "picker bound");
        Some(Self {
            state: PickerState::new(config.page_size),
            debounce: Debouncer::new(config.debounce),
            runtime: FetchRuntime::new(transport),
            id,
            config,
            elements,
            append: false,
            selection: None,
            on_select: None,
            changes: Vec::new(),
        })
    }

    /// Register the callback run after every committed selection.
    pub fn on_select<F>(&mut self, callback: F)
    where
        F: FnMut(&Item) + Send + 'static,
    {
        self.on_select = Some(Box::new(callback));
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn elements(&self) -> &PickerElements {
        &self.elements
    }

    pub fn is_open(&self) -> bool {
        self.elements.menu.is_visible()
    }

    pub fn hidden_value(&self) -> &str {
        self.elements.hidden.value()
    }

    /// The item most recently committed, cleared again by typing.
    pub fn selection(&self) -> Option<&Item> {
        self.selection.as_ref()
    }

    /// Whether a debounced search is waiting to fire.
    pub fn has_pending_search(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn open(&mut self) {
        self.elements.menu.show();
    }

    /// Hide the menu. In-flight requests and cached results are kept.
    pub fn close(&mut self) {
        self.elements.menu.hide();
    }

    /// Start a new query from the first page, superseding any in-flight request.
    pub fn search(&mut self, query: &str) {
        self.state.reset_query(query);
        self.dispatch(false);
    }

    /// Fetch the next page for the current query and append it.
    ///
    /// Returns `false` without doing anything when the server reported no
    /// further pages or a request is already outstanding.
    pub fn load_more(&mut self) -> bool {
        if !self.state.can_load_more() {
            return false;
        }
        self.dispatch(true);
        true
    }

    /// Commit `item` into the hidden and visible fields and close the menu.
    pub fn select(&mut self, item: Item) {
        let value = self.config.commit.value_of(&item);
        self.elements.hidden.set(value.clone());
        self.elements.text.set_value(item.name.clone());
        self.elements.text.set_validity(None);
        self.debounce.cancel();
        self.close();

        tracing::debug!(picker = %self.id, %value, "selection committed");
        if let Some(callback) = self.on_select.as_mut() {
            callback(&item);
        }
        self.changes.push(PickerChange {
            picker: self.id.clone(),
            value,
            item: Some(item.clone()),
        });
        self.selection = Some(item);
    }

    /// React to a host interaction.
    pub fn handle(&mut self, event: PickerEvent, now: Instant) {
        match event {
            PickerEvent::Input(text) => {
                if text != self.elements.text.value() {
                    self.elements.text.set_value(text);
                    self.input_changed(now);
                }
            }
            PickerEvent::Focus | PickerEvent::Click => self.activate(),
            PickerEvent::Scroll(metrics) => {
                if self.state.can_load_more() && metrics.near_bottom(self.config.scroll_threshold) {
                    self.load_more();
                }
            }
            PickerEvent::ClickOutside => self.close(),
            PickerEvent::Choose(row) => {
                if let Some(item) = self.elements.options.rows().get(row).cloned() {
                    self.select(item);
                }
            }
        }
    }

    /// Move the keyboard highlight through the rendered rows.
    pub fn move_highlight(&mut self, delta: isize) {
        self.elements.options.move_highlight(delta);
    }

    /// Select the highlighted row, if any.
    pub fn choose_highlighted(&mut self) -> bool {
        match self.elements.options.highlighted_item().cloned() {
            Some(item) => {
                self.select(item);
                true
            }
            None => false,
        }
    }

    /// Fire the debounced search once its quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.debounce.fire(now) {
            return false;
        }
        let query = self.elements.text.value().trim().to_string();
        if self.config.submit == SubmitPolicy::FreeText {
            self.elements.hidden.set(query.clone());
        }
        self.changes.push(PickerChange {
            picker: self.id.clone(),
            value: String::new(),
            item: None,
        });
        self.open();
        self.search(&query);
        true
    }

    /// Apply every finished request. Returns how many results were accepted.
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

    /// Take the change notifications queued since the last call.
    pub fn drain_changes(&mut self) -> Vec<PickerChange> {
        std::mem::take(&mut self.changes)
    }

    /// Produce the value a host form should submit.
    ///
    /// With [`SubmitPolicy::RequireSelection`] an empty hidden field blocks the
    /// submission and the validity message is raised on the text field. With
    /// [`SubmitPolicy::FreeText`] the trimmed text becomes the value.
    pub fn validate_submit(&mut self) -> Result<String, SubmitError> {
        match self.config.submit {
            SubmitPolicy::RequireSelection => {
                if self.elements.hidden.is_empty() {
                    let message = self.config.messages.select_from_list.clone();
                    self.elements.text.set_validity(Some(&message));
                    return Err(SubmitError::SelectionRequired { message });
                }
                Ok(self.elements.hidden.value().to_string())
            }
            SubmitPolicy::FreeText => {
                let value = self.elements.text.value().trim().to_string();
                self.elements.hidden.set(value.clone());
                Ok(value)
            }
        }
    }

    fn input_changed(&mut self, now: Instant) {
        self.selection = None;
        if self.config.submit == SubmitPolicy::RequireSelection {
            self.elements.hidden.clear();
            let message = self.config.messages.select_from_list.clone();
            self.elements.text.set_validity(Some(&message));
        }
        self.debounce.schedule(now);
    }

    fn activate(&mut self) {
        self.open();
        if self.debounce.is_pending() {
            return;
        }
        self.search("");
    }

    fn dispatch(&mut self, append: bool) {
        let id = self.state.begin_request();
        self.append = append;
        self.elements
            .status
            .set(Some(&self.config.messages.loading));

        let request = self.config.request(&self.state.query, self.state.offset);
        let url = self.config.endpoint_url.clone();
        let result_field = self.config.result_field.clone();
        tracing::debug!(
            picker = %self.id,
            request_id = id,
            query = %request.query,
            offset = request.offset,
            append,
            "dispatching picker request"
        );

        self.runtime.dispatch(id, move |transport| {
            let body = transport.get_json(&url, &request.query_pairs())?;
            Ok(SearchPage::from_value(&body, &result_field))
        });
    }

    /// Apply one result. Returns `false` when it belonged to a superseded request.
    fn apply(&mut self, result: FetchResult<SearchPage>) -> bool {
        if result.id != self.state.request_id {
            tracing::trace!(
                picker = %self.id,
                stale = result.id,
                current = self.state.request_id,
                "discarding stale picker response"
            );
            return false;
        }

        match result.outcome {
            Ok(page) => {
                self.state.accept_page(page.items, page.has_more, self.append);
                self.render();
            }
            Err(err) => {
                tracing::warn!(picker = %self.id, request_id = result.id, %err, "picker request failed");
                self.state.fail();
                self.elements.options.clear();
                self.elements
                    .status
                    .set(Some(&self.config.messages.load_failed));
            }
        }
        true
    }

    fn render(&mut self) {
        self.elements
            .options
            .replace(&self.state.items, self.append);
        let messages = &self.config.messages;
        let status = if self.state.items.is_empty() {
            Some(messages.no_results.as_str())
        } else if self.state.has_more {
            Some(messages.scroll_for_more.as_str())
        } else {
            None
        };
        self.elements.status.set(status);
    }
}
