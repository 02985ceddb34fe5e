use rpick_api::Item;

use super::AnchorId;

/// Scroll position of the option list, in host-defined units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub offset: u32,
    /// Height of the visible window.
    pub viewport: u32,
    /// Height of the full list.
    pub content: u32,
}

impl ScrollMetrics {
    pub fn new(offset: u32, viewport: u32, content: u32) -> Self {
        Self {
            offset,
            viewport,
            content,
        }
    }

    /// Whether the visible window reaches within `threshold` of the bottom.
    pub fn near_bottom(&self, threshold: u32) -> bool {
        u64::from(self.offset) + u64::from(self.viewport)
            >= u64::from(self.content.saturating_sub(threshold))
    }
}

/// Interactions a host forwards to a bound picker.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// The text field now reads this value.
    Input(String),
    /// The text field gained focus.
    Focus,
    /// The text field was clicked.
    Click,
    /// The option list scrolled.
    Scroll(ScrollMetrics),
    /// Something outside the picker was clicked.
    ClickOutside,
    /// A rendered option row was chosen.
    Choose(usize),
}

/// Notification queued whenever a selection is committed or a new search
/// invalidates it, so sibling widgets can react to the new value.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerChange {
    pub picker: AnchorId,
    /// The committed value, empty once a new search has started.
    pub value: String,
    pub item: Option<Item>,
}

impl PickerChange {
    /// Whether this notification clears the previous selection.
    pub fn is_cleared(&self) -> bool {
        self.item.is_none()
    }
}
