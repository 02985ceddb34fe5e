use serde_json::Value;

use crate::error::FetchError;

/// The only I/O seam the picker depends on: a blocking JSON GET.
///
/// Implementations are called from short-lived worker threads, so they must
/// be shareable across threads. Any non-success status, transport failure or
/// undecodable body is reported as a [`FetchError`].
pub trait JsonTransport: Send + Sync {
    fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, FetchError>;
}
