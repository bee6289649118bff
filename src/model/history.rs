use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::request::HttpRequestSpec;
use crate::model::response::HttpResponseResult;

/// One completed execution as recorded by the History Store. Never mutated
/// after creation; the store orders entries by timestamp descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub request: HttpRequestSpec,
    pub response: Option<HttpResponseResult>,
    pub timestamp: DateTime<Utc>,
}

/// Wire shape of `GET history?page=&limit=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPageResponse {
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    #[serde(default)]
    pub data: Vec<HistoryEntry>,
}
