use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use rpick_api::{FetchError, JsonTransport};
use serde_json::Value;

/// Header that tells the server to answer with JSON instead of a page.
pub const REQUESTED_WITH: &str = "X-Requested-With";

/// Blocking HTTP implementation of [`JsonTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client. `timeout` aborts requests that take longer, `None`
    /// waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(2))
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

impl JsonTransport for HttpTransport {
    fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .map_err(|err| FetchError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serve exactly one canned HTTP response and hand back the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let address = format!("http://{}", listener.local_addr().expect("addr"));
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut buffer = [0u8; 4096];
            let read = stream.read(&mut buffer).expect("read");
            let request = String::from_utf8_lossy(&buffer[..read]).to_string();
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write");
            request
        });
        (address, handle)
    }

    #[test]
    fn sends_query_and_ajax_header() {
        let (address, server) = serve_once("HTTP/1.1 200 OK", r#"{"companies":[],"has_more":false}"#);
        let transport = HttpTransport::new(Some(Duration::from_secs(5))).expect("client");
        let query = vec![
            ("offset".to_string(), "0".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("q".to_string(), "acme co".to_string()),
        ];

        let body = transport
            .get_json(&format!("{address}/companies/options"), &query)
            .expect("json body");
        assert_eq!(body["has_more"], false);

        let request = server.join().expect("server").to_ascii_lowercase();
        assert!(request.starts_with("get /companies/options?offset=0&limit=10&q=acme+co "));
        assert!(request.contains("x-requested-with: xmlhttprequest"));
    }

    #[test]
    fn non_success_status_is_an_error() {
        let (address, server) = serve_once("HTTP/1.1 500 Internal Server Error", "{}");
        let transport = HttpTransport::new(None).expect("client");
        let err = transport.get_json(&address, &[]).expect_err("status error");
        assert_eq!(err, FetchError::Status { status: 500 });
        server.join().expect("server");
    }

    #[test]
    fn html_body_is_a_decode_error() {
        let (address, server) = serve_once("HTTP/1.1 200 OK", "<html></html>");
        let transport = HttpTransport::new(None).expect("client");
        let err = transport.get_json(&address, &[]).expect_err("decode error");
        assert!(matches!(err, FetchError::Decode(_)));
        server.join().expect("server");
    }
}
