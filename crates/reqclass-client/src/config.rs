use std::time::Duration;

/// Where the API lives when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Connection settings shared by every call a client makes.
///
/// There is no retry policy: each operation sends at most one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and port, without a trailing slash.
    pub base_url: String,
    /// Whole-request timeout. `None` waits for the transport to give up.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
