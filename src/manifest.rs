//! Client for Mojang's version manifest

use serde::Deserialize;
use tracing::warn;

use crate::config::{MANIFEST_BASE_URL, USER_AGENT};
use crate::error::ApiError;

/// Latest version identifiers published by Mojang
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

/// Version manifest served by piston-meta; only the `latest` block is used
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub latest: LatestVersions,
}

/// Client for the piston-meta version manifest endpoint
pub struct ManifestClient {
    client: reqwest::Client,
    base_url: String,
}

impl ManifestClient {
    /// Creates a new ManifestClient with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }

    /// Fetches the manifest and returns its latest release/snapshot pair.
    ///
    /// A non-success HTTP status is an error here; the whole run depends on
    /// this document.
    pub async fn latest(&self) -> Result<LatestVersions, ApiError> {
        let url = format!("{}/mc/game/version_manifest_v2.json", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Version manifest returned status {}: {}", status, url);
            return Err(ApiError::Status { status, url });
        }

        let manifest: VersionManifest = response.json().await.map_err(|e| {
            warn!("Failed to parse version manifest: {}", e);
            ApiError::InvalidResponse(e.to_string())
        })?;

        Ok(manifest.latest)
    }
}

impl Default for ManifestClient {
    fn default() -> Self {
        Self::new(MANIFEST_BASE_URL)
    }
}
