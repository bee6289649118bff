use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client used for request execution. Fixed per-request timeout.
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .use_rustls_tls()
        .build()
        .expect("Failed to build HTTP client")
}

/// Client used against the History Store. No request timeout; a hung query
/// is bounded by the caller's own supervision.
pub fn build_history_client() -> Client {
    Client::builder()
        .use_rustls_tls()
        .build()
        .expect("Failed to build HTTP client")
}
