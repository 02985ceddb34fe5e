use rpick_api::Item;

/// Query, paging and request bookkeeping for one bound picker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickerState {
    /// Trimmed query; empty means browse mode.
    pub query: String,
    /// How many items have been fetched for `query`.
    pub offset: usize,
    pub limit: usize,
    pub loading: bool,
    pub has_more: bool,
    pub items: Vec<Item>,
    /// Id of the most recently issued request.
    pub request_id: u64,
}

impl PickerState {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Start a fresh, non-appending query.
    pub(crate) fn reset_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.offset = 0;
        self.items.clear();
    }

    /// Allocate the id for the next request and mark the picker busy.
    pub(crate) fn begin_request(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.loading = true;
        self.request_id
    }

    pub(crate) fn accept_page(&mut self, items: Vec<Item>, has_more: bool, append: bool) {
        self.loading = false;
        self.has_more = has_more;
        if append {
            self.items.extend(items);
        } else {
            self.items = items;
        }
        self.offset = self.items.len();
    }

    pub(crate) fn fail(&mut self) {
        self.loading = false;
        self.has_more = false;
        self.items.clear();
        self.offset = 0;
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.loading
    }
}
