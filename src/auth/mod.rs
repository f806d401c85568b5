//! Repository authentication
//!
//! One variant per supported scheme. Adding a scheme means adding a variant
//! here and a match arm in [`Credentials::apply`].

use reqwest::RequestBuilder;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No `Authorization` header
    None,
    /// `Authorization: Basic base64(username:secret)`
    Basic { username: String, secret: String },
    /// `Authorization: Bearer <secret>`; token auth has no username slot
    Token { secret: String },
}

impl Credentials {
    /// Attach the authorization header for this scheme to a request
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::None => request,
            Credentials::Basic { username, secret } => request.basic_auth(username, Some(secret)),
            Credentials::Token { secret } => request.bearer_auth(secret),
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Credentials::None => "none",
            Credentials::Basic { .. } => "basic",
            Credentials::Token { .. } => "token",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::None => f.write_str("None"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("secret", &"<redacted>")
                .finish(),
            Credentials::Token { .. } => f
                .debug_struct("Token")
                .field("secret", &"<redacted>")
                .finish(),
        }
    }
}
