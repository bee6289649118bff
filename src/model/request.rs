use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Variables of the single active environment. Keys are placeholder names.
pub type VariableMap = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// A request body is only dispatched for these methods; every other
    /// method ignores the body entirely.
    pub fn supports_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BodyType {
    #[default]
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "form-data")]
    FormData,
    #[serde(rename = "x-www-form-urlencoded")]
    FormUrlencoded,
    #[serde(rename = "raw")]
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyTarget {
    #[default]
    Header,
    Query,
}

/// Exactly one variant is active; fields invalid for a variant do not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AuthConfig {
    #[default]
    None,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
    ApiKey {
        key: String,
        value: String,
        #[serde(rename = "addTo", default)]
        add_to: ApiKeyTarget,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestSpec {
    pub id: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    /// Unique keys; empty keys may appear transiently and are filtered
    /// before dispatch.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub body_type: BodyType,
    #[serde(default)]
    pub auth: AuthConfig,
    pub created_at: DateTime<Utc>,
}

impl Default for HttpRequestSpec {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::from("Untitled Request"),
            method: HttpMethod::default(),
            url: String::new(),
            headers: HashMap::new(),
            params: HashMap::new(),
            body: String::new(),
            body_type: BodyType::default(),
            auth: AuthConfig::default(),
            created_at: Utc::now(),
        }
    }
}

/// A named variable set from the Request Store. At most one is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub variables: VariableMap,
    #[serde(default)]
    pub active: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::from("New Environment"),
            variables: VariableMap::new(),
            active: false,
        }
    }
}

/// The variable map of the active environment, if any.
pub fn active_variables(environments: &[Environment]) -> Option<&VariableMap> {
    environments.iter().find(|env| env.active).map(|env| &env.variables)
}
