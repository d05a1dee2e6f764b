//! Collected HTTP responses

use serde_json::Value;

/// A completed HTTP exchange as seen by the assertions
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub duration_ms: u128,
    /// Raw response text
    pub text: String,
    /// Parsed body; `None` when the body is empty or not JSON
    pub json: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, duration_ms: u128, text: String) -> Self {
        let json = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };

        Self {
            status,
            duration_ms,
            text,
            json,
        }
    }

    /// Response body formatted for the report: pretty JSON when it parses,
    /// otherwise the raw text
    pub fn pretty_body(&self) -> String {
        match &self.json {
            Some(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| self.text.clone()),
            None => self.text.clone(),
        }
    }

    /// Look up a top-level field of a JSON object body
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.json.as_ref().and_then(|v| v.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_json_body() {
        let resp = ApiResponse::new(200, 3, r#"{"id":1,"title":"t"}"#.into());
        assert_eq!(resp.field("id"), Some(&json!(1)));
        assert_eq!(resp.pretty_body(), "{\n  \"id\": 1,\n  \"title\": \"t\"\n}");
    }

    #[test]
    fn test_empty_and_non_json_bodies() {
        let empty = ApiResponse::new(204, 1, String::new());
        assert!(empty.json.is_none());
        assert_eq!(empty.pretty_body(), "");

        let html = ApiResponse::new(502, 1, "<html>bad gateway</html>".into());
        assert!(html.json.is_none());
        assert_eq!(html.pretty_body(), "<html>bad gateway</html>");
        assert!(html.field("id").is_none());
    }
}
