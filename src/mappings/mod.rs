//! Availability checks for the mapping projects gating a version bump
//!
//! A new game version only propagates once both intermediary and yarn have
//! published artifacts for it. Check failures (network errors, unexpected
//! statuses) count as "not yet available" so a flaky service delays the
//! bump rather than failing the run.

pub mod intermediary;
pub mod yarn;

pub use yarn::YarnMetaClient;

use tracing::warn;

use crate::github::GitHubClient;

/// Availability of the two mapping artifacts for one game version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub intermediary: bool,
    pub yarn: bool,
}

impl Availability {
    /// A version is ready to propagate only when both projects have
    /// published for it.
    pub fn ready(&self) -> bool {
        self.intermediary && self.yarn
    }
}

/// Checks both mapping projects for `version`, treating check errors as
/// absent.
pub async fn check(
    github: &GitHubClient,
    yarn: &YarnMetaClient,
    version: &str,
) -> Availability {
    let intermediary = match intermediary::exists(github, version).await {
        Ok(found) => found,
        Err(err) => {
            warn!("Intermediary check failed for {}: {}", version, err);
            false
        }
    };

    let yarn = match yarn.has_version(version).await {
        Ok(found) => found,
        Err(err) => {
            warn!("Yarn check failed for {}: {}", version, err);
            false
        }
    };

    Availability { intermediary, yarn }
}
