use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized outcome of one execution. Built exactly once; any received
/// HTTP status (including 4xx/5xx) produces one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponseResult {
    pub status: u16,
    #[serde(rename = "statusText")]
    pub status_text: String,
    pub headers: HashMap<String, String>,
    pub data: Value,
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let result = HttpResponseResult {
            status: 200,
            status_text: "OK".to_string(),
            headers: HashMap::new(),
            data: serde_json::json!({"ok": true}),
            duration_ms: 12,
            size_bytes: 11,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["statusText"], "OK");
        assert_eq!(json["duration"], 12);
        assert_eq!(json["size"], 11);
    }

    #[test]
    fn test_round_trip() {
        let raw = r#"{
            "status": 404,
            "statusText": "Not Found",
            "headers": {"content-type": "application/json"},
            "data": {"error": "missing"},
            "duration": 45,
            "size": 19
        }"#;
        let result: HttpResponseResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.status, 404);
        assert_eq!(result.duration_ms, 45);
        assert_eq!(result.size_bytes, 19);
    }
}
