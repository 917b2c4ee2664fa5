//! The fixed database query and caller overrides.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::notion::types::{QueryError, QueryResult};

/// JSON body of a `databases/{id}/query` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DatabaseQuery(Map<String, Value>);

impl DatabaseQuery {
    /// Active rows only, highest rated first.
    pub fn active_by_rating() -> Self {
        let mut body = Map::new();
        body.insert(
            "filter".to_string(),
            json!({ "property": "Status", "select": { "equals": "Active" } }),
        );
        body.insert(
            "sorts".to_string(),
            json!([{ "property": "Rating", "direction": "descending" }]),
        );
        Self(body)
    }

    /// Shallow-merge caller keys over the fixed query; caller keys win.
    pub fn merge(mut self, overrides: Map<String, Value>) -> Self {
        self.0.extend(overrides);
        self
    }

    /// Parse an inbound request body into override keys.
    ///
    /// An empty (or whitespace-only) body means no overrides.
    pub fn overrides_from_body(body: &[u8]) -> QueryResult<Map<String, Value>> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(QueryError::InvalidRequest(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(QueryError::InvalidRequest(e.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_query_shape() {
        let query = serde_json::to_value(DatabaseQuery::active_by_rating()).unwrap();
        assert_eq!(
            query,
            json!({
                "filter": { "property": "Status", "select": { "equals": "Active" } },
                "sorts": [{ "property": "Rating", "direction": "descending" }]
            })
        );
    }

    #[test]
    fn test_merge_overrides_win() {
        let overrides = DatabaseQuery::overrides_from_body(
            br#"{"page_size": 10, "sorts": [{"property": "Name", "direction": "ascending"}]}"#,
        )
        .unwrap();
        let query = DatabaseQuery::active_by_rating().merge(overrides);

        assert_eq!(query.get("page_size"), Some(&json!(10)));
        assert_eq!(
            query.get("sorts"),
            Some(&json!([{"property": "Name", "direction": "ascending"}]))
        );
        // Untouched keys survive.
        assert_eq!(
            query.get("filter"),
            DatabaseQuery::active_by_rating().get("filter")
        );
    }

    #[test]
    fn test_empty_body_has_no_overrides() {
        assert!(DatabaseQuery::overrides_from_body(b"").unwrap().is_empty());
        assert!(DatabaseQuery::overrides_from_body(b" \n ").unwrap().is_empty());
    }

    #[test]
    fn test_non_object_body_rejected() {
        let err = DatabaseQuery::overrides_from_body(b"[1, 2]").unwrap_err();
        assert!(matches!(err, QueryError::InvalidRequest(ref m) if m.contains("an array")));

        let err = DatabaseQuery::overrides_from_body(b"{not json").unwrap_err();
        assert!(matches!(err, QueryError::InvalidRequest(_)));
    }
}
