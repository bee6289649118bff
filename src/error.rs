#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// No response was obtainable: DNS failure, refused connection, timeout.
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// History Store query or append failed; the cache declines to update.
    #[error("History error: {0}")]
    History(String),
}
