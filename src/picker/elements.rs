//! Typed stand-ins for the regions a picker binds to.
//!
//! A host hands the picker a [`PickerAnchors`] bundle with whichever regions it
//! actually rendered. Binding only happens when every region is present, which
//! keeps the "render the picker conditionally" policy an explicit branch.

use rpick_api::Item;

/// Stable identifier of the region that contains a picker.
pub type AnchorId = String;

/// The visible free-text input. Editing happens in the host; the picker only
/// sees the resulting text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    validity: Option<String>,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            validity: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Message explaining why the current value cannot be submitted.
    pub fn validity(&self) -> Option<&str> {
        self.validity.as_deref()
    }

    pub fn set_validity(&mut self, message: Option<&str>) {
        self.validity = message.map(str::to_string);
    }
}

/// The form field that carries the committed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenField {
    name: String,
    value: String,
}

impl HiddenField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// The dropdown container. Hidden until the picker opens it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    visible: bool,
}

impl Menu {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Rendered result rows plus the keyboard highlight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionList {
    rows: Vec<Item>,
    highlighted: Option<usize>,
}

impl OptionList {
    pub fn rows(&self) -> &[Item] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Re-render from `items`. Appending keeps the highlight where it was.
    pub fn replace(&mut self, items: &[Item], keep_highlight: bool) {
        self.rows = items.to_vec();
        self.highlighted = match self.highlighted {
            _ if self.rows.is_empty() => None,
            Some(index) if keep_highlight => Some(index.min(self.rows.len() - 1)),
            _ => None,
        };
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.highlighted = None;
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_item(&self) -> Option<&Item> {
        self.highlighted.and_then(|index| self.rows.get(index))
    }

    /// Move the highlight by `delta` rows, clamping at both ends.
    pub fn move_highlight(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.highlighted = None;
            return;
        }
        let last = self.rows.len() - 1;
        let next = match self.highlighted {
            None if delta >= 0 => 0,
            None => last,
            Some(current) => current.saturating_add_signed(delta).min(last),
        };
        self.highlighted = Some(next);
    }
}

/// One-line status shown under the options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    text: String,
}

impl StatusLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: Option<&str>) {
        self.text = text.unwrap_or_default().to_string();
    }
}

/// The regions a host offers to a picker. Any of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct PickerAnchors {
    pub container: Option<AnchorId>,
    pub text: Option<TextField>,
    pub hidden: Option<HiddenField>,
    pub menu: Option<Menu>,
    pub options: Option<OptionList>,
    pub status: Option<StatusLine>,
}

impl PickerAnchors {
    /// A full set of empty regions for `container`, committing into `hidden_name`.
    pub fn complete(container: impl Into<AnchorId>, hidden_name: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
            text: Some(TextField::default()),
            hidden: Some(HiddenField::new(hidden_name)),
            menu: Some(Menu::default()),
            options: Some(OptionList::default()),
            status: Some(StatusLine::default()),
        }
    }

    /// Resolve into bound elements, or `None` when a region is missing.
    pub(crate) fn resolve(self) -> Option<(AnchorId, PickerElements)> {
        Some((
            self.container?,
            PickerElements {
                text: self.text?,
                hidden: self.hidden?,
                menu: self.menu?,
                options: self.options?,
                status: self.status?,
            },
        ))
    }
}

/// The regions owned by a bound picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerElements {
    pub text: TextField,
    pub hidden: HiddenField,
    pub menu: Menu,
    pub options: OptionList,
    pub status: StatusLine,
}
