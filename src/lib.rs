//! is-mergeable: check whether a GitHub pull request is ready to merge
//!
//! The crate is split into an effectful edge and a pure core:
//! - [`platform`] fetches a [`types::PullRequestSnapshot`] from GitHub
//! - [`readiness`] reduces the snapshot to a [`types::Verdict`]
//! - [`config`] and [`auth`] turn user input into a target and policy

pub mod auth;
pub mod config;
pub mod error;
pub mod platform;
pub mod readiness;
pub mod types;

pub use error::{Error, Result};
pub use readiness::{ReadinessOptions, evaluate};
