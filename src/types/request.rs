use serde::{Deserialize, Serialize};

use super::ItemKind;

/// A search against the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub kind: ItemKind,
    #[serde(default)]
    pub query: String,
}

impl SearchRequest {
    pub fn new(kind: ItemKind, query: impl Into<String>) -> Self {
        Self {
            kind,
            query: query.into(),
        }
    }
}

/// An install request as received from the transport layer.
///
/// `item_type` stays a raw string: rejecting anything other than `plugin` or
/// `theme` is the orchestrator's first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRequest {
    #[serde(rename = "type")]
    pub item_type: String,
    pub slug: String,
}

impl InstallRequest {
    pub fn new(item_type: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            slug: slug.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_request_wire_names() {
        let req: InstallRequest =
            serde_json::from_str(r#"{"type":"plugin","slug":"acme"}"#).unwrap();
        assert_eq!(req, InstallRequest::new("plugin", "acme"));
    }

    #[test]
    fn test_search_request_query_defaults_empty() {
        let req: SearchRequest = serde_json::from_str(r#"{"kind":"theme"}"#).unwrap();
        assert_eq!(req, SearchRequest::new(ItemKind::Theme, ""));
    }
}
