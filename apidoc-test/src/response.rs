use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::json_path::resolve_path;

/// A buffered response. Assertions consume and return `self` so they chain.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn assert_status(self, expected: StatusCode) -> Self {
        if self.status != expected {
            self.fail(&format!("expected status {expected}, got {}", self.status));
        }
        self
    }

    pub fn assert_ok(self) -> Self {
        self.assert_status(StatusCode::OK)
    }

    pub fn assert_created(self) -> Self {
        self.assert_status(StatusCode::CREATED)
    }

    pub fn assert_no_content(self) -> Self {
        self.assert_status(StatusCode::NO_CONTENT)
    }

    pub fn assert_bad_request(self) -> Self {
        self.assert_status(StatusCode::BAD_REQUEST)
    }

    pub fn assert_not_found(self) -> Self {
        self.assert_status(StatusCode::NOT_FOUND)
    }

    /// The header must start with `prefix`, so `text/html` accepts
    /// `text/html; charset=utf-8`.
    pub fn assert_header(self, name: &str, prefix: &str) -> Self {
        match self.header(name) {
            Some(value) if value.starts_with(prefix) => {}
            Some(value) => self.fail(&format!("header {name}: {value:?} does not start with {prefix:?}")),
            None => self.fail(&format!("header {name} is missing")),
        }
        self
    }

    pub fn assert_text_contains(self, needle: &str) -> Self {
        if !self.text().contains(needle) {
            self.fail(&format!("body does not contain {needle:?}"));
        }
        self
    }

    /// Compare the value at a [`json_path`](crate::json_path) with `expected`.
    ///
    /// ```ignore
    /// resp.assert_json_path("info.title", "Vehicle API")
    ///     .assert_json_path("servers.len()", 2);
    /// ```
    pub fn assert_json_path(self, path: &str, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        let actual = resolve_path(&self.json::<Value>(), path);
        if actual != expected {
            self.fail(&format!("{path}: expected {expected}, got {actual}"));
        }
        self
    }

    /// Deserialize the value at `path`.
    pub fn json_path<T: DeserializeOwned>(&self, path: &str) -> T {
        let value = resolve_path(&self.json::<Value>(), path);
        serde_json::from_value(value)
            .unwrap_or_else(|e| self.fail(&format!("{path} has an unexpected shape: {e}")))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| self.fail(&format!("body is not the expected JSON: {e}")))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    fn fail(&self, message: &str) -> ! {
        panic!("{message}\nstatus: {}\nbody: {}", self.status, self.text())
    }
}
