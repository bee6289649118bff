use std::collections::HashMap;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::env::resolver::resolve;
use crate::model::request::{ApiKeyTarget, AuthConfig, VariableMap};

/// Inject credentials into `headers` per the configured strategy. Returns
/// the query-parameter additions for strategies that target the query
/// string. Only ever adds or overwrites entries; missing credential fields
/// silently inject nothing.
pub fn apply(
    headers: &mut HashMap<String, String>,
    auth: &AuthConfig,
    vars: &VariableMap,
) -> Vec<(String, String)> {
    let mut query_additions = Vec::new();

    match auth {
        AuthConfig::None => {}
        AuthConfig::Bearer { token } => {
            let token = resolve(token, vars);
            if !token.is_empty() {
                headers.insert("Authorization".to_string(), format!("Bearer {token}"));
            }
        }
        AuthConfig::Basic { username, password } => {
            // Password goes out exactly as stored, never template-resolved.
            if !username.is_empty() && !password.is_empty() {
                let credentials = STANDARD.encode(format!("{username}:{password}"));
                headers.insert("Authorization".to_string(), format!("Basic {credentials}"));
            }
        }
        AuthConfig::ApiKey { key, value, add_to } => {
            if !key.is_empty() && !value.is_empty() {
                let value = resolve(value, vars);
                match add_to {
                    ApiKeyTarget::Header => {
                        headers.insert(key.clone(), value);
                    }
                    ApiKeyTarget::Query => query_additions.push((key.clone(), value)),
                }
            }
        }
    }

    query_additions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_vars(pairs: &[(&str, &str)]) -> VariableMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_bearer_sets_authorization() {
        let mut headers = HashMap::new();
        let additions = apply(
            &mut headers,
            &AuthConfig::Bearer { token: "abc".to_string() },
            &make_vars(&[]),
        );
        assert!(additions.is_empty());
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer abc");
    }

    #[test]
    fn test_bearer_token_is_resolved() {
        let mut headers = HashMap::new();
        apply(
            &mut headers,
            &AuthConfig::Bearer { token: "{{token}}".to_string() },
            &make_vars(&[("token", "secret")]),
        );
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer secret");
    }

    #[test]
    fn test_bearer_empty_token_injects_nothing() {
        let mut headers = HashMap::new();
        apply(&mut headers, &AuthConfig::Bearer { token: String::new() }, &make_vars(&[]));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_basic_encodes_credentials() {
        let mut headers = HashMap::new();
        apply(
            &mut headers,
            &AuthConfig::Basic { username: "u".to_string(), password: "p".to_string() },
            &make_vars(&[]),
        );
        // base64("u:p")
        assert_eq!(headers.get("Authorization").unwrap(), "Basic dTpw");
    }

    #[test]
    fn test_basic_password_not_resolved() {
        let mut headers = HashMap::new();
        apply(
            &mut headers,
            &AuthConfig::Basic {
                username: "u".to_string(),
                password: "{{p}}".to_string(),
            },
            &make_vars(&[("p", "real")]),
        );
        let expected = format!("Basic {}", STANDARD.encode("u:{{p}}"));
        assert_eq!(headers.get("Authorization").unwrap(), &expected);
    }

    #[test]
    fn test_basic_missing_password_injects_nothing() {
        let mut headers = HashMap::new();
        apply(
            &mut headers,
            &AuthConfig::Basic { username: "u".to_string(), password: String::new() },
            &make_vars(&[]),
        );
        assert!(headers.is_empty());
    }

    #[test]
    fn test_api_key_header() {
        let mut headers = HashMap::new();
        let additions = apply(
            &mut headers,
            &AuthConfig::ApiKey {
                key: "X-Api-Key".to_string(),
                value: "{{key}}".to_string(),
                add_to: ApiKeyTarget::Header,
            },
            &make_vars(&[("key", "k123")]),
        );
        assert!(additions.is_empty());
        assert_eq!(headers.get("X-Api-Key").unwrap(), "k123");
    }

    #[test]
    fn test_api_key_query() {
        let mut headers = HashMap::new();
        let additions = apply(
            &mut headers,
            &AuthConfig::ApiKey {
                key: "api_key".to_string(),
                value: "k123".to_string(),
                add_to: ApiKeyTarget::Query,
            },
            &make_vars(&[]),
        );
        assert!(headers.is_empty());
        assert_eq!(additions, vec![("api_key".to_string(), "k123".to_string())]);
    }

    #[test]
    fn test_unrelated_headers_untouched() {
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        apply(&mut headers, &AuthConfig::Bearer { token: "t".to_string() }, &make_vars(&[]));
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Accept").unwrap(), "application/json");
    }

    #[test]
    fn test_none_is_noop() {
        let mut headers = HashMap::new();
        let additions = apply(&mut headers, &AuthConfig::None, &make_vars(&[]));
        assert!(headers.is_empty());
        assert!(additions.is_empty());
    }
}
