use indexmap::IndexMap;

const RESERVED_KEYS: [&str; 3] = ["offset", "limit", "q"];

/// Parameters of a single page request against a picker endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub offset: usize,
    pub limit: usize,
    pub query: String,
    pub extra_params: IndexMap<String, String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            query: query.into(),
            extra_params: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_extra_params(mut self, params: IndexMap<String, String>) -> Self {
        self.extra_params = params;
        self
    }

    /// Build the query string pairs in wire order: `offset`, `limit`, `q`
    /// (only for a non-empty query), then the extra parameters.
    ///
    /// Extra parameters cannot override the paging keys.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("offset".to_string(), self.offset.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if !self.query.is_empty() {
            pairs.push(("q".to_string(), self.query.clone()));
        }
        pairs.extend(
            self.extra_params
                .iter()
                .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        pairs
    }
}
