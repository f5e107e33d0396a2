//! Error types for is-mergeable

use thiserror::Error;

/// What kind of platform value was outside its documented set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnexpectedKind {
    /// `state` of a pull request review
    ReviewState,
    /// `state` of a legacy commit status
    StatusState,
    /// `status` of a check run
    CheckStatus,
    /// `conclusion` of a completed check run
    CheckConclusion,
}

impl std::fmt::Display for UnexpectedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReviewState => write!(f, "review.state"),
            Self::StatusState => write!(f, "status state"),
            Self::CheckStatus => write!(f, "check status"),
            Self::CheckConclusion => write!(f, "check conclusion"),
        }
    }
}

/// Errors produced by is-mergeable
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing user input, reported with usage guidance
    #[error("{0}")]
    Validation(String),

    /// Policy file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// The platform returned a value outside a documented closed set
    #[error("Unexpected {kind} \"{value}\"")]
    UnexpectedValue {
        /// Which field carried the value
        kind: UnexpectedKind,
        /// The offending raw value
        value: String,
    },

    /// GitHub API request or decoding failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),
}

impl Error {
    /// Shorthand for building an [`Error::UnexpectedValue`]
    pub fn unexpected(kind: UnexpectedKind, value: impl Into<String>) -> Self {
        Self::UnexpectedValue {
            kind,
            value: value.into(),
        }
    }

    /// Whether this error stems from bad user input rather than a failed run
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
