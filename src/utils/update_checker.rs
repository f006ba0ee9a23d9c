//! Update checker for `LaunchDeck`
//!
//! Checks GitHub releases for a newer version. Checks are rate limited via
//! the persisted last-check timestamp and fail softly: a network or parse
//! problem never affects the editor beyond a log line.

use crate::error::{LaunchDeckError, Result};
use semver::Version;
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// GitHub API response for a release
#[derive(Debug, Deserialize)]
struct GitHubRelease {
    /// Release tag name (e.g. "v1.2.3" or "1.2.3")
    tag_name: String,
    /// Browser URL of the release page
    html_url: String,
    /// Whether this is a prerelease
    prerelease: bool,
}

/// Result of an update check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheckResult {
    /// Current version of the application
    pub current_version: Version,
    /// Latest version available on GitHub
    pub latest_version: Version,
    /// Whether an update is available
    pub update_available: bool,
    /// URL of the release page for the latest version
    pub release_url: String,
}

/// Update checker against a GitHub repository
pub struct UpdateChecker {
    repo_owner: String,
    repo_name: String,
    current_version: Version,
    /// Minimum time between checks in seconds (rate limiting)
    min_check_interval_secs: u64,
}

impl UpdateChecker {
    /// Create a new update checker
    pub fn new(
        repo_owner: impl Into<String>,
        repo_name: impl Into<String>,
        current_version: Version,
        min_check_interval_secs: u64,
    ) -> Self {
        Self {
            repo_owner: repo_owner.into(),
            repo_name: repo_name.into(),
            current_version,
            min_check_interval_secs,
        }
    }

    /// Whether enough time has passed since `last_check_time` (a Unix
    /// timestamp, 0 when never checked) to check again
    pub fn should_check(&self, last_check_time: u64) -> bool {
        if last_check_time == 0 {
            return true;
        }
        let elapsed = Self::current_timestamp().saturating_sub(last_check_time);
        elapsed >= self.min_check_interval_secs
    }

    /// Current Unix timestamp in seconds
    pub fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    /// Fetch the latest release and compare versions.
    ///
    /// Errors (network, HTTP status, JSON, version parse) are returned for
    /// the caller to log; they are never user-fatal.
    pub fn check_for_updates(&self) -> Result<UpdateCheckResult> {
        info!("Checking for updates from GitHub");

        let api_url = format!(
            "https://api.github.com/repos/{}/{}/releases/latest",
            self.repo_owner, self.repo_name
        );
        debug!("Fetching latest release from: {api_url}");

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent(format!("LaunchDeck/{}", self.current_version))
            .build()
            .map_err(|e| LaunchDeckError::UpdateCheckError(Box::new(e)))?;

        let response = client
            .get(&api_url)
            .send()
            .map_err(|e| LaunchDeckError::UpdateCheckError(Box::new(e)))?;

        if !response.status().is_success() {
            warn!("GitHub API returned error status: {}", response.status());
            return Err(LaunchDeckError::UpdateCheckError(
                crate::error::StringError::new(format!(
                    "GitHub API returned error status: {}",
                    response.status()
                )),
            ));
        }

        let release: GitHubRelease = response
            .json()
            .map_err(|e| LaunchDeckError::UpdateCheckError(Box::new(e)))?;
        debug!("Fetched release: {release:?}");

        if release.prerelease {
            info!("Latest release is a prerelease, skipping");
            return Err(LaunchDeckError::UpdateCheckError(
                crate::error::StringError::new("Latest release is a prerelease"),
            ));
        }

        let tag_name = release.tag_name.trim_start_matches('v');
        let latest_version = Version::parse(tag_name).map_err(|e| {
            warn!("Failed to parse version from tag '{tag_name}': {e}");
            LaunchDeckError::UpdateCheckError(Box::new(e))
        })?;

        let update_available = latest_version > self.current_version;
        if update_available {
            info!(
                "Update available: {} -> {}",
                self.current_version, latest_version
            );
        } else {
            info!("Application is up to date");
        }

        Ok(UpdateCheckResult {
            current_version: self.current_version.clone(),
            latest_version,
            update_available,
            release_url: release.html_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(interval: u64) -> UpdateChecker {
        UpdateChecker::new(
            "engels74",
            "LaunchDeck",
            Version::parse("0.1.0").unwrap(),
            interval,
        )
    }

    #[test]
    fn test_should_check_never_checked() {
        assert!(checker(60).should_check(0));
    }

    #[test]
    fn test_should_check_rate_limiting() {
        let checker = checker(60);
        let now = UpdateChecker::current_timestamp();

        assert!(!checker.should_check(now));
        assert!(checker.should_check(now.saturating_sub(61)));
    }

    #[test]
    fn test_version_parsing_with_v_prefix() {
        let with_v = Version::parse("v1.2.3".trim_start_matches('v')).unwrap();
        let without_v = Version::parse("1.2.3").unwrap();
        assert_eq!(with_v, without_v);
    }

    #[test]
    fn test_release_json_shape() {
        let json = r#"{
            "tag_name": "v0.2.0",
            "html_url": "https://github.com/engels74/LaunchDeck/releases/tag/v0.2.0",
            "prerelease": false
        }"#;
        let release: GitHubRelease = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "v0.2.0");
        assert!(!release.prerelease);
        assert!(release.html_url.ends_with("v0.2.0"));
    }
}
