use serde::Deserialize;
use serde_json::Value;

use super::Item;

/// One page of results decoded from a picker endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub items: Vec<Item>,
    pub has_more: bool,
}

impl SearchPage {
    pub fn new(items: Vec<Item>, has_more: bool) -> Self {
        Self { items, has_more }
    }

    /// Decode a response body shaped `{ <result_field>: [...], has_more: bool }`.
    ///
    /// Decoding is lenient: a missing or non-array result field yields no
    /// items, entries that do not carry an `id` are skipped, and `has_more`
    /// follows the usual truthiness rules.
    pub fn from_value(value: &Value, result_field: &str) -> Self {
        let items = value
            .get(result_field)
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| Item::deserialize(entry).ok())
                    .collect()
            })
            .unwrap_or_default();
        let has_more = value.get("has_more").is_some_and(is_truthy);
        Self { items, has_more }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Loose boolean coercion for flags sent by the server.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
