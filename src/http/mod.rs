pub mod auth;
pub mod body;
pub mod client;
pub mod executor;
