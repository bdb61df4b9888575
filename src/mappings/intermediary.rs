//! Intermediary mapping existence check
//!
//! Intermediary publishes one `.tiny` file per game version to its GitHub
//! repository; the file being present on `master` is the signal that the
//! version is mapped.

use crate::error::ApiError;
use crate::github::GitHubClient;

/// Repository holding the intermediary mappings
pub const OWNER: &str = "FabricMC";
pub const REPO: &str = "intermediary";
pub const BRANCH: &str = "master";

/// Checks whether an intermediary mapping file exists for `version`.
pub async fn exists(github: &GitHubClient, version: &str) -> Result<bool, ApiError> {
    let path = format!("mappings/{}.tiny", version);
    github.file_exists(OWNER, REPO, &path, BRANCH).await
}
