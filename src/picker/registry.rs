use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use indexmap::map::Entry;
use rpick_api::{JsonTransport, PickerConfig};

use super::{AnchorId, PickerAnchors, PickerChange, PickerEvent, RemoteSearchPicker};

/// Owns every picker mounted on a page, keyed by container id.
///
/// Mounting is idempotent: re-running page initialization for a container
/// that already hosts a picker returns the existing instance untouched, so
/// events are never routed twice.
#[derive(Debug, Default)]
pub struct PickerRegistry {
    pickers: IndexMap<AnchorId, RemoteSearchPicker>,
}

impl PickerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a picker to `anchors` unless its container is already mounted.
    pub fn mount(
        &mut self,
        anchors: PickerAnchors,
        config: PickerConfig,
        transport: Arc<dyn JsonTransport>,
    ) -> Option<&mut RemoteSearchPicker> {
        let container = anchors.container.clone()?;
        match self.pickers.entry(container) {
            Entry::Occupied(entry) => {
                tracing::debug!(picker = %entry.key(), "picker already mounted");
                Some(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let picker = RemoteSearchPicker::initialize(anchors, config, transport)?;
                Some(entry.insert(picker))
            }
        }
    }

    /// Drop the picker bound to `id`, e.g. when its region is removed.
    pub fn unmount(&mut self, id: &str) -> Option<RemoteSearchPicker> {
        self.pickers.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&RemoteSearchPicker> {
        self.pickers.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut RemoteSearchPicker> {
        self.pickers.get_mut(id)
    }

    /// Route an event to the picker bound to `id`.
    pub fn dispatch(&mut self, id: &str, event: PickerEvent, now: Instant) -> bool {
        match self.pickers.get_mut(id) {
            Some(picker) => {
                picker.handle(event, now);
                true
            }
            None => false,
        }
    }

    /// Let every picker fire its debounce. Returns how many searches started.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.pickers
            .values_mut()
            .map(|picker| usize::from(picker.tick(now)))
            .sum()
    }

    /// Apply finished requests for every picker.
    pub fn pump(&mut self) -> usize {
        self.pickers.values_mut().map(RemoteSearchPicker::pump).sum()
    }

    pub fn drain_changes(&mut self) -> Vec<PickerChange> {
        self.pickers
            .values_mut()
            .flat_map(RemoteSearchPicker::drain_changes)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickers.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.pickers.keys().map(String::as_str)
    }
}
