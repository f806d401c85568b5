//! RepositoryClient trait and the pure URL/response helpers behind it
//!
//! The repository exposes two endpoints per item kind:
//! `{repo_url}{plugins|themes}/search?query=<q>` and
//! `{repo_url}{plugins|themes}/download/{slug}`.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{RepoxError, Result};
use crate::storage::RepositoryConfig;
use crate::types::{ItemKind, SearchResults};

/// Message returned when no repository URL is stored for the scope
pub const NOT_CONFIGURED: &str = "Repository URL is not configured.";

/// Client for an external package repository
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Search the repository for items of `kind`
    ///
    /// # Returns
    /// * `Ok(SearchResults)` - the decoded body exactly as the repository sent it
    /// * `Err(RepoxError::Configuration)` - no repository URL configured
    /// * `Err(RepoxError::HttpStatus)` - non-2xx response
    /// * `Err(RepoxError::Transport)` - connection failure or timeout
    /// * `Err(RepoxError::MalformedResponse)` - body is not valid JSON
    async fn search(
        &self,
        config: &RepositoryConfig,
        kind: ItemKind,
        query: &str,
    ) -> Result<SearchResults>;

    /// Download URL for an item, `None` when no repository is configured
    fn download_url(
        &self,
        config: &RepositoryConfig,
        kind: ItemKind,
        slug: &str,
    ) -> Option<String> {
        download_url(config, kind, slug)
    }
}

fn base_url(config: &RepositoryConfig) -> Option<String> {
    if config.repo_url.is_empty() {
        return None;
    }
    Some(format!("{}/", config.repo_url.trim_end_matches('/')))
}

/// `{repo_url}{kind}s/search`, plus a percent-encoded `query` parameter when non-empty
pub fn search_url(config: &RepositoryConfig, kind: ItemKind, query: &str) -> Result<String> {
    let base = base_url(config)
        .ok_or_else(|| RepoxError::Configuration(NOT_CONFIGURED.to_string()))?;
    let mut url = format!("{base}{}/search", kind.plural());
    if !query.is_empty() {
        url.push_str("?query=");
        url.push_str(&urlencoding::encode(query));
    }
    Ok(url)
}

/// `{repo_url}{kind}s/download/{slug}`
pub fn download_url(config: &RepositoryConfig, kind: ItemKind, slug: &str) -> Option<String> {
    let base = base_url(config)?;
    Some(format!("{base}{}/download/{slug}", kind.plural()))
}

/// Decode a search response body.
///
/// Only a body that is not valid JSON is an error. Whatever the repository
/// sent is kept as-is; item shape is left to the consumer.
pub fn parse_response(body: &str) -> Result<SearchResults> {
    serde_json::from_str::<Value>(body)
        .map(SearchResults::new)
        .map_err(|e| RepoxError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::AuthMethod;
    use serde_json::json;

    fn config(url: &str) -> RepositoryConfig {
        RepositoryConfig {
            repo_url: url.to_string(),
            auth_method: AuthMethod::None,
            ..Default::default()
        }
    }

    #[test]
    fn test_search_url_without_query() {
        let url = search_url(&config("https://x.test/"), ItemKind::Plugin, "").unwrap();
        assert_eq!(url, "https://x.test/plugins/search");
    }

    #[test]
    fn test_search_url_with_query() {
        let url = search_url(&config("https://x.test/"), ItemKind::Theme, "seo").unwrap();
        assert_eq!(url, "https://x.test/themes/search?query=seo");
    }

    #[test]
    fn test_search_url_percent_encodes_query() {
        let url = search_url(&config("https://x.test/"), ItemKind::Plugin, "a b&c=d/é").unwrap();
        assert_eq!(
            url,
            "https://x.test/plugins/search?query=a%20b%26c%3Dd%2F%C3%A9"
        );
    }

    #[test]
    fn test_search_url_requires_repository() {
        let err = search_url(&config(""), ItemKind::Plugin, "x").unwrap_err();
        assert!(matches!(err, RepoxError::Configuration(_)));
        assert_eq!(err.to_string(), NOT_CONFIGURED);
    }

    #[test]
    fn test_download_url_composition() {
        assert_eq!(
            download_url(&config("https://x.test/repo/"), ItemKind::Plugin, "acme").as_deref(),
            Some("https://x.test/repo/plugins/download/acme")
        );
        assert_eq!(
            download_url(&config("https://x.test"), ItemKind::Theme, "dark").as_deref(),
            Some("https://x.test/themes/download/dark")
        );
    }

    #[test]
    fn test_download_url_is_pure() {
        let cfg = config("https://x.test/");
        let first = download_url(&cfg, ItemKind::Plugin, "acme");
        let second = download_url(&cfg, ItemKind::Plugin, "acme");
        assert_eq!(first, second);
    }

    #[test]
    fn test_download_url_empty_repository_is_none() {
        assert_eq!(download_url(&config(""), ItemKind::Plugin, "acme"), None);
        assert_eq!(download_url(&config(""), ItemKind::Theme, ""), None);
    }

    #[test]
    fn test_parse_response_array() {
        let results =
            parse_response(r#"[{"name":"Acme","slug":"acme","version":"1.2"},{"slug":"b"}]"#)
                .unwrap();
        let items = results.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name.as_deref(), Some("Acme"));
        assert!(items[1].description.is_none());
    }

    #[test]
    fn test_parse_response_keeps_wrapper_fields() {
        let results = parse_response(r#"{"items":[{"slug":"acme"}],"total":7}"#).unwrap();
        assert_eq!(results.items().len(), 1);
        assert_eq!(results.raw()["total"], 7);
    }

    #[test]
    fn test_parse_response_forwards_any_json() {
        let error_body = parse_response(r#"{"error":"quota exceeded"}"#).unwrap();
        assert_eq!(error_body.raw(), &json!({"error": "quota exceeded"}));

        let strings = parse_response(r#"["just", "strings"]"#).unwrap();
        assert_eq!(strings.raw(), &json!(["just", "strings"]));
        assert!(strings.items().is_empty());
    }

    #[test]
    fn test_parse_response_rejects_invalid_json() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(RepoxError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_response(""),
            Err(RepoxError::MalformedResponse(_))
        ));
    }
}
