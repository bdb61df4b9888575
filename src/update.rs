//! The version bump run
//!
//! One run reads the stored markers, compares them against Mojang's
//! manifest, and — when something changed and the mappings for both new
//! versions exist — commits the patched properties file and dispatches the
//! build workflow. There are no retries; the scheduler simply runs the tool
//! again later.

use std::fs;

use tracing::info;

use crate::config::{self, Config};
use crate::error::{PropertiesError, UpdateError};
use crate::github::GitHubClient;
use crate::manifest::{LatestVersions, ManifestClient};
use crate::mappings::{self, YarnMetaClient};
use crate::properties::Properties;

/// Properties key holding the last-known release version
pub const PROP_RELEASE: &str = "latest_release";

/// Properties key holding the last-known snapshot version
pub const PROP_SNAPSHOT: &str = "latest_snapshot";

/// Last-known version pair stored in the properties file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub release: String,
    pub snapshot: String,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Manifest matches the stored markers; nothing to do
    UpToDate,
    /// A new version was detected but its mappings are not published yet;
    /// nothing was written
    AwaitingMappings { version: String },
    /// Markers committed and the build workflow dispatched
    Updated { release: String, snapshot: String },
}

/// Reads both version markers out of a parsed properties file.
pub fn read_markers(props: &Properties) -> Result<Markers, PropertiesError> {
    let release = props
        .get(PROP_RELEASE)
        .ok_or_else(|| PropertiesError::MissingKey(PROP_RELEASE.to_string()))?;
    let snapshot = props
        .get(PROP_SNAPSHOT)
        .ok_or_else(|| PropertiesError::MissingKey(PROP_SNAPSHOT.to_string()))?;

    Ok(Markers {
        release: release.to_string(),
        snapshot: snapshot.to_string(),
    })
}

/// Returns the marker keys whose stored value differs from the manifest,
/// paired with the new values. Plain string equality, no normalization.
pub fn changed_keys(markers: &Markers, latest: &LatestVersions) -> Vec<(&'static str, String)> {
    let mut changed = Vec::new();
    if latest.release != markers.release {
        changed.push((PROP_RELEASE, latest.release.clone()));
    }
    if latest.snapshot != markers.snapshot {
        changed.push((PROP_SNAPSHOT, latest.snapshot.clone()));
    }
    changed
}

/// Executes one run end to end.
pub async fn run(
    config: &Config,
    manifest: &ManifestClient,
    github: &GitHubClient,
    yarn: &YarnMetaClient,
) -> Result<Outcome, UpdateError> {
    let text =
        fs::read_to_string(&config.properties_path).map_err(|source| UpdateError::ReadProperties {
            path: config.properties_path.clone(),
            source,
        })?;
    let mut props = Properties::parse(&text);
    let markers = read_markers(&props)?;

    let latest = manifest.latest().await?;

    info!(
        "Current release: {}, current snapshot: {}",
        markers.release, markers.snapshot
    );
    info!(
        "Latest release: {}, latest snapshot: {}",
        latest.release, latest.snapshot
    );

    let changed = changed_keys(&markers, &latest);
    if changed.is_empty() {
        return Ok(Outcome::UpToDate);
    }

    // Either marker changing gates on mappings for both new versions.
    for version in [&latest.release, &latest.snapshot] {
        let availability = mappings::check(github, yarn, version).await;
        if !availability.ready() {
            return Ok(Outcome::AwaitingMappings {
                version: version.clone(),
            });
        }
    }

    for (key, value) in &changed {
        props.set(key, value)?;
    }
    let patched = props.render();

    if config.dry_run {
        info!("Dry run, skipping commit and dispatch:\n{}", patched);
        return Ok(Outcome::Updated {
            release: latest.release,
            snapshot: latest.snapshot,
        });
    }

    let current = github
        .get_content(
            &config.owner,
            &config.repo,
            &config.properties_path,
            &config.branch,
        )
        .await?;
    github
        .update_file(
            &config.owner,
            &config.repo,
            &config.properties_path,
            config::COMMIT_MESSAGE,
            &patched,
            &current.sha,
            &config.branch,
        )
        .await?;
    github
        .dispatch_workflow(&config.owner, &config.repo, &config.workflow, &config.branch)
        .await?;

    Ok(Outcome::Updated {
        release: latest.release,
        snapshot: latest.snapshot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn markers(release: &str, snapshot: &str) -> Markers {
        Markers {
            release: release.to_string(),
            snapshot: snapshot.to_string(),
        }
    }

    fn latest(release: &str, snapshot: &str) -> LatestVersions {
        LatestVersions {
            release: release.to_string(),
            snapshot: snapshot.to_string(),
        }
    }

    #[rstest]
    #[case("1.21", "1.21-rc1", "1.21", "1.21-rc1", vec![])]
    #[case("1.21", "1.21-rc1", "1.21.1", "1.21-rc1", vec![(PROP_RELEASE, "1.21.1")])]
    #[case("1.21", "24w33a", "1.21", "24w34a", vec![(PROP_SNAPSHOT, "24w34a")])]
    #[case(
        "1.21",
        "24w33a",
        "1.21.1",
        "24w34a",
        vec![(PROP_RELEASE, "1.21.1"), (PROP_SNAPSHOT, "24w34a")]
    )]
    fn changed_keys_compares_by_string_equality(
        #[case] current_release: &str,
        #[case] current_snapshot: &str,
        #[case] new_release: &str,
        #[case] new_snapshot: &str,
        #[case] expected: Vec<(&'static str, &str)>,
    ) {
        let changed = changed_keys(
            &markers(current_release, current_snapshot),
            &latest(new_release, new_snapshot),
        );

        let expected: Vec<(&'static str, String)> = expected
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();
        assert_eq!(changed, expected);
    }

    #[test]
    fn read_markers_returns_both_values() {
        let props = Properties::parse("latest_release=1.21\nlatest_snapshot=24w33a\n");

        assert_eq!(read_markers(&props).unwrap(), markers("1.21", "24w33a"));
    }

    #[test]
    fn read_markers_fails_when_a_marker_is_missing() {
        let props = Properties::parse("latest_release=1.21\n");

        assert!(matches!(
            read_markers(&props),
            Err(PropertiesError::MissingKey(key)) if key == PROP_SNAPSHOT
        ));
    }
}
