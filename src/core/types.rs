//! Shared types used across client modules
//!
//! Contains the credential wrapper used by every authenticated request.

use std::fmt;

/// An API key from the BrowserAct integrations page.
///
/// Sent as a bearer token on every request. The wrapper keeps the raw
/// value out of `Debug` output and log lines; call [`ApiKey::expose`]
/// only at the point the Authorization header is built.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key value
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw token, for building the Authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// A masked form safe to print: first four characters, then an ellipsis
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(4).collect();
        format!("{}...", prefix)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}
