use std::collections::HashMap;
use std::time::Instant;

use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::auth;
use super::body::{self, EncodedBody};
use super::client::{DEFAULT_TIMEOUT, build_client};
use crate::env::resolver::resolve;
use crate::error::RelayError;
use crate::model::request::{HttpMethod, HttpRequestSpec, VariableMap};
use crate::model::response::HttpResponseResult;

/// Executes request specifications against their resolved endpoints and
/// normalizes whatever comes back. Any received HTTP status is a successful
/// transport; only the absence of a response is an error.
pub struct Executor {
    client: Client,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    pub fn new() -> Self {
        Self { client: build_client(DEFAULT_TIMEOUT) }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn execute(
        &self,
        spec: &HttpRequestSpec,
        vars: &VariableMap,
    ) -> Result<HttpResponseResult, RelayError> {
        let mut url = Url::parse(&resolve(&spec.url, vars))?;

        // Resolved header values; empty keys and empty values are dropped.
        let mut headers: HashMap<String, String> = spec
            .headers
            .iter()
            .filter(|(k, _)| !k.is_empty())
            .map(|(k, v)| (k.clone(), resolve(v, vars)))
            .filter(|(_, v)| !v.is_empty())
            .collect();

        let query_additions = auth::apply(&mut headers, &spec.auth, vars);

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &spec.params {
                if key.is_empty() {
                    continue;
                }
                pairs.append_pair(key, &resolve(value, vars));
            }
            for (key, value) in &query_additions {
                pairs.append_pair(key, value);
            }
        }

        let (payload, implied_content_type) = if spec.method.supports_body() {
            body::encode(&spec.body, spec.body_type, vars)
        } else {
            (EncodedBody::Empty, None)
        };
        if let Some(content_type) = implied_content_type {
            // An explicitly set Content-Type header wins over the encoder's.
            let explicit = headers.keys().any(|k| k.eq_ignore_ascii_case("content-type"));
            if !explicit {
                headers.insert("Content-Type".to_string(), content_type.to_string());
            }
        }

        debug!(method = spec.method.as_str(), url = %url, "dispatching request");

        let method = match spec.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        };

        let mut builder = self.client.request(method, url);
        for (key, value) in &headers {
            builder = builder.header(key, value);
        }
        builder = match payload {
            EncodedBody::Empty => builder,
            EncodedBody::Json(value) => builder.body(serde_json::to_string(&value)?),
            EncodedBody::Text(text) => builder.body(text),
        };

        let request = builder.build().map_err(|err| RelayError::Network(err.to_string()))?;

        let start = Instant::now();
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| RelayError::Network(err.to_string()))?;

        let status = response.status();
        let status_code = status.as_u16();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        let response_headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        match response.bytes().await {
            Ok(bytes) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                let size_bytes = bytes.len() as u64;
                let data = parse_body(&bytes, &content_type);

                info!(status = status_code, duration_ms, size_bytes, "request completed");

                Ok(HttpResponseResult {
                    status: status_code,
                    status_text,
                    headers: response_headers,
                    data,
                    duration_ms,
                    size_bytes,
                })
            }
            Err(err) => {
                // Status and headers arrived but the body did not; report
                // the partial response rather than failing.
                let duration_ms = start.elapsed().as_millis() as u64;
                warn!(status = status_code, error = %err, "response body unreadable");

                Ok(HttpResponseResult {
                    status: status_code,
                    status_text,
                    headers: response_headers,
                    data: Value::Null,
                    duration_ms,
                    size_bytes: 0,
                })
            }
        }
    }
}

fn parse_body(bytes: &[u8], content_type: &str) -> Value {
    if content_type.contains("application/json") {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(json) => json,
            Err(_) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        }
    } else if bytes.is_empty() {
        Value::Null
    } else {
        Value::String(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_json() {
        let data = parse_body(br#"{"ok":true}"#, "application/json; charset=utf-8");
        assert_eq!(data, serde_json::json!({"ok": true}));
    }

    #[test]
    fn test_parse_body_invalid_json_falls_back_to_string() {
        let data = parse_body(b"oops", "application/json");
        assert_eq!(data, Value::String("oops".to_string()));
    }

    #[test]
    fn test_parse_body_text() {
        let data = parse_body(b"hello", "text/plain");
        assert_eq!(data, Value::String("hello".to_string()));
    }

    #[test]
    fn test_parse_body_empty() {
        assert_eq!(parse_body(b"", "text/plain"), Value::Null);
    }
}
