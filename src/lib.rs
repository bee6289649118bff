//! Request execution engine and history cache for an API client.
//!
//! The crate covers the two stateful parts of the system: executing a
//! request spec (environment templating, auth injection, body encoding,
//! response normalization) and browsing a persisted history through a
//! TTL-cached paginated view. Collection/environment CRUD and persistence
//! live with external collaborators.

pub mod config;
pub mod env;
pub mod error;
pub mod history;
pub mod http;
pub mod logger;
pub mod model;
pub mod session;

pub use config::RelayConfig;
pub use error::RelayError;
pub use history::cache::{Clock, HistoryCache, HistoryPage, SystemClock};
pub use history::client::HistoryClient;
pub use http::executor::Executor;
pub use model::history::{HistoryEntry, HistoryPageResponse};
pub use model::request::{
    ApiKeyTarget, AuthConfig, BodyType, Environment, HttpMethod, HttpRequestSpec, VariableMap,
    active_variables,
};
pub use model::response::HttpResponseResult;
pub use session::Session;
