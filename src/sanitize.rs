//! Input sanitization for settings and search queries
//!
//! These never fail: anything unusable collapses to an empty string (or the
//! default auth method), so a bad form submission can't leave a half-written
//! record behind.

use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("whitespace pattern is valid"));

/// Normalize a repository base URL.
///
/// Trailing slashes are collapsed to exactly one. Only absolute `http`/`https`
/// URLs with a host and without query or fragment are accepted; anything else
/// yields an empty string.
pub fn sanitize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let candidate = format!("{}/", trimmed.trim_end_matches('/'));
    match Url::parse(&candidate) {
        Ok(url)
            if matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty())
                && url.query().is_none()
                && url.fragment().is_none() =>
        {
            url.to_string()
        }
        _ => String::new(),
    }
}

/// Strip markup and line breaks from a single-line text field
pub fn sanitize_text_field(input: &str) -> String {
    let without_tags = TAG_RE.replace_all(input, "");
    let without_stray = without_tags.replace(['<', '>'], "");
    WHITESPACE_RE
        .replace_all(&without_stray, " ")
        .trim()
        .to_string()
}

/// Lower-case and keep only `[a-z0-9_-]`
pub fn sanitize_key(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}
