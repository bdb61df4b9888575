use crate::error::ConfigError;

// =============================================================================
// External endpoints
// =============================================================================

/// Base URL for Mojang's piston-meta service
pub const MANIFEST_BASE_URL: &str = "https://piston-meta.mojang.com";

/// Base URL for the Fabric meta service
pub const FABRIC_META_BASE_URL: &str = "https://meta.fabricmc.net";

/// Base URL for the GitHub REST API
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";

/// User agent sent with every outgoing request
pub const USER_AGENT: &str = concat!("mc-version-bump/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Defaults
// =============================================================================

/// Commit message used when bumping the version markers
pub const COMMIT_MESSAGE: &str = "Update Mapping Versions";

/// Branch the bump is committed to and the workflow is dispatched on
pub const DEFAULT_BRANCH: &str = "main";

/// Workflow file dispatched after a successful commit
pub const DEFAULT_WORKFLOW: &str = "build.yml";

/// Properties file holding the version markers, relative to both the local
/// working tree and the repository root
pub const DEFAULT_PROPERTIES_PATH: &str = "gradle.properties";

/// Configuration for a single run.
///
/// Everything the run needs is carried here explicitly; nothing reads the
/// process environment after construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub access token used for all GitHub API calls
    pub token: String,
    /// Owner of the repository holding the properties file
    pub owner: String,
    /// Name of the repository holding the properties file
    pub repo: String,
    /// Branch to commit to and dispatch the workflow on
    pub branch: String,
    /// Workflow file name to dispatch
    pub workflow: String,
    /// Path of the properties file
    pub properties_path: String,
    /// Log the patched file instead of committing and dispatching
    pub dry_run: bool,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// Requires `GITHUB_TOKEN` and `GITHUB_REPOSITORY` (in `owner/repo`
    /// form, as provided by GitHub Actions).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("GITHUB_TOKEN").ok_or(ConfigError::MissingEnv("GITHUB_TOKEN"))?;
        let repository =
            lookup("GITHUB_REPOSITORY").ok_or(ConfigError::MissingEnv("GITHUB_REPOSITORY"))?;

        let (owner, repo) = match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
                (owner.to_string(), repo.to_string())
            }
            _ => return Err(ConfigError::InvalidRepository(repository)),
        };

        Ok(Self {
            token,
            owner,
            repo,
            branch: DEFAULT_BRANCH.to_string(),
            workflow: DEFAULT_WORKFLOW.to_string(),
            properties_path: DEFAULT_PROPERTIES_PATH.to_string(),
            dry_run: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn from_map(map: &HashMap<String, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn from_lookup_splits_repository_and_applies_defaults() {
        let config = from_map(&env(&[
            ("GITHUB_TOKEN", "ghp_test"),
            ("GITHUB_REPOSITORY", "FabricMC/yarn-meta"),
        ]))
        .unwrap();

        assert_eq!(config.token, "ghp_test");
        assert_eq!(config.owner, "FabricMC");
        assert_eq!(config.repo, "yarn-meta");
        assert_eq!(config.branch, DEFAULT_BRANCH);
        assert_eq!(config.workflow, DEFAULT_WORKFLOW);
        assert_eq!(config.properties_path, DEFAULT_PROPERTIES_PATH);
        assert!(!config.dry_run);
    }

    #[test]
    fn from_lookup_fails_without_token() {
        let result = from_map(&env(&[("GITHUB_REPOSITORY", "owner/repo")]));

        assert!(matches!(result, Err(ConfigError::MissingEnv("GITHUB_TOKEN"))));
    }

    #[test]
    fn from_lookup_fails_without_repository() {
        let result = from_map(&env(&[("GITHUB_TOKEN", "ghp_test")]));

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnv("GITHUB_REPOSITORY"))
        ));
    }

    #[test]
    fn from_lookup_rejects_repository_without_owner() {
        let result = from_map(&env(&[
            ("GITHUB_TOKEN", "ghp_test"),
            ("GITHUB_REPOSITORY", "just-a-name"),
        ]));

        assert!(matches!(result, Err(ConfigError::InvalidRepository(_))));
    }
}
