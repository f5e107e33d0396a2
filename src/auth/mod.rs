//! Authentication for GitHub
//!
//! Tokens come from the environment only, never from flags.

use crate::error::{Error, Result};

/// Preferred token variable
pub const TOKEN_ENV_VAR: &str = "GITHUB_API_TOKEN";

/// Fallback token variable, as set by GitHub Actions
pub const FALLBACK_TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Resolved GitHub credentials
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Environment variable the token was read from
    pub source: &'static str,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Read the GitHub token from the process environment
pub fn get_github_auth() -> Result<GitHubAuthConfig> {
    github_auth_from(|name| std::env::var(name).ok())
}

/// Resolve the token through `lookup`, which maps a variable name to its value
///
/// Empty values are treated as unset.
pub fn github_auth_from(lookup: impl Fn(&str) -> Option<String>) -> Result<GitHubAuthConfig> {
    [TOKEN_ENV_VAR, FALLBACK_TOKEN_ENV_VAR]
        .into_iter()
        .find_map(|name| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .map(|token| GitHubAuthConfig {
                    token,
                    source: name,
                })
        })
        .ok_or_else(|| {
            Error::Validation(format!(
                "${TOKEN_ENV_VAR} must be set (or ${FALLBACK_TOKEN_ENV_VAR})"
            ))
        })
}
