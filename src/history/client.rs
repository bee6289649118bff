use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::RelayError;
use crate::http::client::build_history_client;
use crate::model::history::{HistoryEntry, HistoryPageResponse};

/// Thin client for the History Store boundary: a paginated query plus an
/// append-only write. Both go over HTTP to the store's base URL.
#[derive(Clone)]
pub struct HistoryClient {
    http: Client,
    base_url: Url,
}

impl HistoryClient {
    pub fn new(base_url: Url) -> Self {
        Self { http: build_history_client(), base_url }
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn history_url(&self) -> Result<Url, RelayError> {
        let mut url = self.base_url.clone();
        // Push a segment instead of join(): join() would drop the last
        // path segment of a base URL without a trailing slash.
        url.path_segments_mut()
            .map_err(|_| RelayError::History("history base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("history");
        Ok(url)
    }

    /// `GET {base}/history?page=&limit=`. Entries come back ordered by
    /// timestamp descending.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<HistoryPageResponse, RelayError> {
        let mut url = self.history_url()?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        debug!(page, limit, "querying history store");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| RelayError::History(err.to_string()))?;
        if !response.status().is_success() {
            return Err(RelayError::History(format!(
                "history query returned {}",
                response.status()
            )));
        }
        response
            .json::<HistoryPageResponse>()
            .await
            .map_err(|err| RelayError::History(err.to_string()))
    }

    /// `POST {base}/history` with a completed execution.
    pub async fn append(&self, entry: &HistoryEntry) -> Result<(), RelayError> {
        let url = self.history_url()?;
        let response = self
            .http
            .post(url)
            .json(entry)
            .send()
            .await
            .map_err(|err| RelayError::History(err.to_string()))?;
        if !response.status().is_success() {
            return Err(RelayError::History(format!(
                "history append returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
