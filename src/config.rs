//! Configuration: pull request target and readiness policy
//!
//! Policy can come from a TOML file and from command-line flags; flags win.
//!
//! ```toml
//! # .is-mergeable.toml
//! checks = ["ci/build", "ci/test"]
//! min_reviews = 2
//! ignore_git_mergeability = false
//! ```

use crate::error::{Error, Result};
use crate::readiness::ReadinessOptions;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Policy file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = ".is-mergeable.toml";

static SHORTHAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<owner>[A-Za-z0-9_.-]+)/(?P<repo>[A-Za-z0-9_.-]+)#(?P<number>\d+)$")
        .expect("shorthand regex is valid")
});

/// The pull request to evaluate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrTarget {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// PR number
    pub number: u64,
}

impl std::fmt::Display for PrTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Parse `owner/repo#123` or a pull request URL such as
/// `https://github.com/owner/repo/pull/123`
pub fn parse_pr_reference(reference: &str) -> Result<PrTarget> {
    let reference = reference.trim();

    if let Some(caps) = SHORTHAND_RE.captures(reference) {
        return Ok(PrTarget {
            owner: caps["owner"].to_string(),
            repo: caps["repo"].to_string(),
            number: parse_number(&caps["number"])?,
        });
    }

    if let Ok(url) = Url::parse(reference) {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        if let [owner, repo, "pull" | "pulls", number, ..] = segments.as_slice() {
            return Ok(PrTarget {
                owner: (*owner).to_string(),
                repo: (*repo).to_string(),
                number: parse_number(number)?,
            });
        }
    }

    Err(Error::Validation(format!(
        "\"{reference}\" is not a pull request reference (expected <owner>/<repo>#<number> or a pull request URL)"
    )))
}

fn parse_number(value: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| Error::Validation("--pull-request must be number".to_string()))
}

/// Combine the positional reference with the identity flags
///
/// Either the reference or all three flags must be given, not both.
pub fn resolve_target(
    reference: Option<&str>,
    owner: Option<&str>,
    repo: Option<&str>,
    number: Option<u64>,
) -> Result<PrTarget> {
    if let Some(reference) = reference {
        if owner.is_some() || repo.is_some() || number.is_some() {
            return Err(Error::Validation(
                "pass either <owner>/<repo>#<number> or --owner/--repo/--pull-request, not both"
                    .to_string(),
            ));
        }
        return parse_pr_reference(reference);
    }

    let owner = owner.ok_or_else(|| Error::Validation("--owner must be a string".to_string()))?;
    let repo = repo.ok_or_else(|| Error::Validation("--repo must be a string".to_string()))?;
    let number =
        number.ok_or_else(|| Error::Validation("--pull-request must be number".to_string()))?;

    Ok(PrTarget {
        owner: owner.to_string(),
        repo: repo.to_string(),
        number,
    })
}

/// Readiness policy as written in a TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    /// Required check names
    pub checks: Option<Vec<String>>,
    /// Minimum approvals
    pub min_reviews: Option<u32>,
    /// Skip the platform mergeability check
    pub ignore_git_mergeability: Option<bool>,
}

impl PolicyFile {
    /// Load and parse a policy file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Load `explicit` if given, otherwise [`DEFAULT_CONFIG_FILE`] in `dir` if it exists
    ///
    /// An explicit path that does not exist is an error; a missing default file is not.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Option<Self>> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    return Ok(None);
                }
                candidate
            }
        };

        debug!(path = %path.display(), "loading policy file");
        Self::load(&path).map(Some)
    }
}

/// Policy values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyOverrides {
    /// `--check` values, each possibly comma-separated
    pub checks: Vec<String>,
    /// `--min-reviews`
    pub min_reviews: Option<u32>,
    /// `--ignore-git-mergeability`
    pub ignore_git_mergeability: bool,
}

/// Split comma-separated check lists and drop empty names
pub fn split_checks<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.as_ref().split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Merge file policy and flag overrides into engine options
///
/// Flags replace file values; `--check` replaces the file's whole list.
pub fn resolve_options(file: Option<&PolicyFile>, overrides: &PolicyOverrides) -> ReadinessOptions {
    let file_checks = file.and_then(|f| f.checks.as_deref()).map(split_checks);
    let required_checks = if overrides.checks.is_empty() {
        file_checks
    } else {
        Some(split_checks(&overrides.checks))
    };

    ReadinessOptions {
        min_reviews: overrides
            .min_reviews
            .or_else(|| file.and_then(|f| f.min_reviews)),
        required_checks,
        ignore_git_mergeability: overrides.ignore_git_mergeability
            || file.and_then(|f| f.ignore_git_mergeability).unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_shorthand() {
        let target = parse_pr_reference("jamiebuilds/is-mergeable#14").unwrap();
        assert_eq!(target.owner, "jamiebuilds");
        assert_eq!(target.repo, "is-mergeable");
        assert_eq!(target.number, 14);
        assert_eq!(target.to_string(), "jamiebuilds/is-mergeable#14");
    }

    #[test]
    fn test_parse_pull_url() {
        let target = parse_pr_reference("https://github.com/octo/widgets/pull/7/files").unwrap();
        assert_eq!(
            target,
            PrTarget {
                owner: "octo".to_string(),
                repo: "widgets".to_string(),
                number: 7,
            }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_pr_reference("octo/widgets").unwrap_err().is_validation());
        assert!(
            parse_pr_reference("https://github.com/octo/widgets/issues/7")
                .unwrap_err()
                .is_validation()
        );
    }

    #[test]
    fn test_resolve_target_from_flags() {
        let target = resolve_target(None, Some("octo"), Some("widgets"), Some(3)).unwrap();
        assert_eq!(target.to_string(), "octo/widgets#3");
    }

    #[test]
    fn test_resolve_target_missing_flag() {
        let err = resolve_target(None, Some("octo"), None, Some(3)).unwrap_err();
        assert_eq!(err.to_string(), "--repo must be a string");
    }

    #[test]
    fn test_resolve_target_conflict() {
        let err = resolve_target(Some("octo/widgets#3"), Some("octo"), None, None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_split_checks() {
        let checks = split_checks(&["ci/build, ci/test", "lint", ""]);
        assert_eq!(checks, vec!["ci/build", "ci/test", "lint"]);
    }

    #[test]
    fn test_flags_override_file() {
        let file = PolicyFile {
            checks: Some(vec!["ci/build".to_string()]),
            min_reviews: Some(1),
            ignore_git_mergeability: Some(true),
        };
        let overrides = PolicyOverrides {
            checks: vec!["ci/test".to_string()],
            min_reviews: Some(2),
            ignore_git_mergeability: false,
        };
        let options = resolve_options(Some(&file), &overrides);

        assert_eq!(options.required_checks, Some(vec!["ci/test".to_string()]));
        assert_eq!(options.min_reviews, Some(2));
        assert!(options.ignore_git_mergeability);
    }

    #[test]
    fn test_no_file_no_flags_is_default() {
        let options = resolve_options(None, &PolicyOverrides::default());
        assert_eq!(options, ReadinessOptions::default());
    }

    #[test]
    fn test_discover_default_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            "checks = [\"ci/test\"]\nmin_reviews = 2\n",
        )
        .unwrap();

        let file = PolicyFile::discover(None, temp.path()).unwrap().unwrap();
        assert_eq!(file.checks, Some(vec!["ci/test".to_string()]));
        assert_eq!(file.min_reviews, Some(2));
        assert_eq!(file.ignore_git_mergeability, None);
    }

    #[test]
    fn test_discover_without_file() {
        let temp = TempDir::new().unwrap();
        assert!(PolicyFile::discover(None, temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let err = PolicyFile::discover(Some(&missing), temp.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("policy.toml");
        fs::write(&path, "min_review = 2\n").unwrap();

        assert!(matches!(PolicyFile::load(&path), Err(Error::Config(_))));
    }
}
