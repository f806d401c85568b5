use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a repository search result.
///
/// The repository owns this shape; every field is optional and anything
/// unrecognized is kept in `extra` so it can be forwarded unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decoded search response body, exactly as the repository sent it.
///
/// Usually a JSON array of item objects, or an object with an `items` array,
/// but any valid JSON is accepted and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResults(Value);

impl SearchResults {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_raw(self) -> Value {
        self.0
    }

    /// The list part of the body: a top-level array, or the array under `items`
    pub fn entries(&self) -> &[Value] {
        match &self.0 {
            Value::Array(list) => list,
            Value::Object(map) => match map.get("items") {
                Some(Value::Array(list)) => list,
                _ => &[],
            },
            _ => &[],
        }
    }

    /// Entries that read as items. Anything else stays reachable via [`Self::raw`].
    pub fn items(&self) -> Vec<RepositoryItem> {
        self.entries()
            .iter()
            .filter(|entry| entry.is_object())
            .filter_map(|entry| RepositoryItem::deserialize(entry).ok())
            .collect()
    }
}

impl From<Vec<RepositoryItem>> for SearchResults {
    fn from(items: Vec<RepositoryItem>) -> Self {
        Self(Value::Array(
            items
                .iter()
                .filter_map(|item| serde_json::to_value(item).ok())
                .collect(),
        ))
    }
}

/// Response of a search operation as seen by the transport layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    Error { error: String },
    /// Repository body, forwarded verbatim
    Results(SearchResults),
}

impl SearchOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        SearchOutcome::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SearchOutcome::Error { .. })
    }

    pub fn items(&self) -> Vec<RepositoryItem> {
        match self {
            SearchOutcome::Results(results) => results.items(),
            SearchOutcome::Error { .. } => Vec::new(),
        }
    }
}

impl From<crate::error::Result<SearchResults>> for SearchOutcome {
    fn from(result: crate::error::Result<SearchResults>) -> Self {
        match result {
            Ok(results) => SearchOutcome::Results(results),
            Err(e) => SearchOutcome::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_tolerates_missing_fields() {
        let item: RepositoryItem = serde_json::from_str(r#"{"slug": "acme"}"#).unwrap();
        assert_eq!(item.slug.as_deref(), Some("acme"));
        assert!(item.name.is_none());
        assert!(item.version.is_none());
    }

    #[test]
    fn test_item_keeps_unknown_fields() {
        let item: RepositoryItem =
            serde_json::from_str(r#"{"name": "Acme", "downloads": 42}"#).unwrap();
        assert_eq!(item.extra.get("downloads"), Some(&Value::from(42)));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["downloads"], 42);
        assert_eq!(back["name"], "Acme");
    }

    #[test]
    fn test_results_entries_from_either_shape() {
        let bare = SearchResults::new(json!([{"slug": "a"}, {"slug": "b"}]));
        assert_eq!(bare.entries().len(), 2);

        let wrapped = SearchResults::new(json!({"items": [{"slug": "a"}], "total": 7}));
        assert_eq!(wrapped.items()[0].slug.as_deref(), Some("a"));
        assert_eq!(wrapped.raw()["total"], 7);

        let other = SearchResults::new(json!({"error": "quota exceeded"}));
        assert!(other.entries().is_empty());
    }

    #[test]
    fn test_results_items_skip_non_objects() {
        let results = SearchResults::new(json!(["just", {"slug": "acme"}, 3]));
        assert_eq!(results.entries().len(), 3);
        assert_eq!(results.items().len(), 1);
    }

    #[test]
    fn test_search_outcome_wire_shape() {
        let body = json!({"items": [], "total": 0});
        let ok = SearchOutcome::Results(SearchResults::new(body.clone()));
        assert_eq!(serde_json::to_value(&ok).unwrap(), body);

        let err = SearchOutcome::error("Repository URL is not configured.");
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"error":"Repository URL is not configured."}"#
        );
        assert!(err.items().is_empty());
    }

    #[test]
    fn test_repository_payload_forwarded_verbatim() {
        let body = json!({"error": "quota exceeded", "retry_after": 60});
        let outcome = SearchOutcome::from(Ok(SearchResults::new(body.clone())));
        assert!(!outcome.is_error());
        assert_eq!(serde_json::to_value(&outcome).unwrap(), body);
    }
}
