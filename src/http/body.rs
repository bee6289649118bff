use url::form_urlencoded;

use crate::env::resolver::resolve;
use crate::model::request::{BodyType, VariableMap};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, PartialEq)]
pub enum EncodedBody {
    Empty,
    Json(serde_json::Value),
    Text(String),
}

/// Prepare an outgoing payload for the declared body type. Returns the
/// payload plus the content type the encoding implies, if any.
///
/// A `json` body that fails to parse degrades to the resolved raw string
/// with no implied content type; encoding never errors.
pub fn encode(
    body: &str,
    body_type: BodyType,
    vars: &VariableMap,
) -> (EncodedBody, Option<&'static str>) {
    if body.is_empty() {
        return (EncodedBody::Empty, None);
    }

    let resolved = resolve(body, vars);
    match body_type {
        BodyType::Json => match serde_json::from_str(&resolved) {
            Ok(value) => (EncodedBody::Json(value), Some(CONTENT_TYPE_JSON)),
            Err(_) => (EncodedBody::Text(resolved), None),
        },
        BodyType::FormUrlencoded => {
            let pairs: Vec<(String, String)> =
                form_urlencoded::parse(resolved.as_bytes()).into_owned().collect();
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish();
            (EncodedBody::Text(encoded), Some(CONTENT_TYPE_FORM))
        }
        BodyType::Raw | BodyType::FormData => (EncodedBody::Text(resolved), None),
    }
}
