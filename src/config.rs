use std::time::Duration;

use serde::Deserialize;

/// Tunables for a session. Loadable from TOML; every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Base URL of the History Store.
    pub history_base_url: String,
    /// Entries per history page.
    pub page_size: u32,
    /// Seconds before a cached history page goes stale.
    pub ttl_secs: u64,
    /// Transport timeout in seconds for request execution.
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            history_base_url: String::from("http://localhost:4000"),
            page_size: 10,
            ttl_secs: 5 * 60,
            timeout_secs: 30,
        }
    }
}

impl RelayConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
