use chrono::Utc;
use tracing::warn;
use url::Url;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::history::cache::{Clock, HistoryCache, SystemClock};
use crate::history::client::HistoryClient;
use crate::http::client::build_client;
use crate::http::executor::Executor;
use crate::model::history::HistoryEntry;
use crate::model::request::{HttpRequestSpec, VariableMap};
use crate::model::response::HttpResponseResult;

/// Ties the executor and the history layer together: execute, record the
/// outcome to the History Store, surface the new entry by force-refreshing
/// page 1 of the cache.
pub struct Session<C: Clock = SystemClock> {
    executor: Executor,
    history: HistoryClient,
    cache: HistoryCache<C>,
}

impl Session<SystemClock> {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let history = HistoryClient::new(Url::parse(&config.history_base_url)?);
        let cache = HistoryCache::new(history.clone(), config.page_size, config.ttl());
        Ok(Self {
            executor: Executor::with_client(build_client(config.timeout())),
            history,
            cache,
        })
    }
}

impl<C: Clock> Session<C> {
    pub fn from_parts(executor: Executor, history: HistoryClient, cache: HistoryCache<C>) -> Self {
        Self { executor, history, cache }
    }

    /// Execute `spec` and return its normalized response.
    ///
    /// On any completed execution (HTTP errors included) a history entry is
    /// recorded and page 1 is refreshed. The append is awaited before the
    /// refresh so the new row is durably stored when the query runs, but
    /// neither history failure is allowed to fail the send; both are logged
    /// and swallowed. A transport failure records nothing.
    pub async fn send(
        &mut self,
        spec: &HttpRequestSpec,
        vars: &VariableMap,
    ) -> Result<HttpResponseResult, RelayError> {
        let response = self.executor.execute(spec, vars).await?;

        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            request: spec.clone(),
            response: Some(response.clone()),
            timestamp: Utc::now(),
        };
        if let Err(err) = self.history.append(&entry).await {
            warn!(error = %err, "failed to record history entry");
        }
        if let Err(err) = self.cache.load_page(1, true).await {
            warn!(error = %err, "failed to refresh history after execution");
        }

        Ok(response)
    }

    pub fn cache(&self) -> &HistoryCache<C> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut HistoryCache<C> {
        &mut self.cache
    }
}
