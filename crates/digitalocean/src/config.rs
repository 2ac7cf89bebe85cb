//! Facade configuration.

use std::time::Duration;

use url::Url;

/// Root of the public DigitalOcean API. Tag endpoints live under `v2/tags`.
pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com/";

/// Per-request deadline applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by every facade built from one connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root; `v2/tags` is appended to its path.
    pub base_url: Url,

    /// Whole-request deadline (connect, send, and read the body).
    pub timeout: Duration,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with the default timeout and
    /// user agent.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn default_user_agent() -> String {
    format!("doit-provider-tag/{}", env!("CARGO_PKG_VERSION"))
}
