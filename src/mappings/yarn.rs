//! Yarn mapping existence check via the Fabric meta service

use tracing::warn;

use crate::config::{FABRIC_META_BASE_URL, USER_AGENT};
use crate::error::ApiError;

/// Client for the Fabric meta service
pub struct YarnMetaClient {
    client: reqwest::Client,
    base_url: String,
}

impl YarnMetaClient {
    /// Creates a new YarnMetaClient with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }

    /// Checks whether yarn has published at least one build for
    /// `game_version`.
    pub async fn has_version(&self, game_version: &str) -> Result<bool, ApiError> {
        let url = format!("{}/v2/versions/yarn/{}", self.base_url, game_version);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Fabric meta returned status {}: {}", status, url);
            return Err(ApiError::Status { status, url });
        }

        // Entries carry build metadata the run never looks at; only the
        // presence of at least one build matters.
        let builds: Vec<serde_json::Value> = response.json().await.map_err(|e| {
            warn!("Failed to parse yarn version listing: {}", e);
            ApiError::InvalidResponse(e.to_string())
        })?;

        Ok(!builds.is_empty())
    }
}

impl Default for YarnMetaClient {
    fn default() -> Self {
        Self::new(FABRIC_META_BASE_URL)
    }
}
