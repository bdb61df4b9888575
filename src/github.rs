//! Minimal GitHub REST client
//!
//! Covers the three calls a run needs: reading a file's blob sha, updating
//! the file through the contents API, and dispatching a workflow. Updates
//! carry the sha read beforehand, so a concurrent change to the file makes
//! the update fail instead of silently overwriting it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::config::{GITHUB_API_BASE_URL, USER_AGENT};
use crate::error::ApiError;

/// Blob metadata returned by the contents API
#[derive(Debug, Clone, Deserialize)]
pub struct ContentInfo {
    pub sha: String,
}

/// Client for the GitHub REST API
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Creates a new GitHubClient with a custom base URL
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
            token: token.to_string(),
        }
    }

    /// Production client against api.github.com
    pub fn with_token(token: &str) -> Self {
        Self::new(GITHUB_API_BASE_URL, token)
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!("{}/repos/{}/{}/contents/{}", self.base_url, owner, repo, path)
    }

    /// Fetches blob metadata for `path` on `reference`.
    pub async fn get_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<ContentInfo, ApiError> {
        let url = self.contents_url(owner, repo, path);

        let response = self
            .client
            .get(&url)
            .query(&[("ref", reference)])
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(ApiError::Status { status, url });
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse contents response: {}", e);
            ApiError::InvalidResponse(e.to_string())
        })
    }

    /// Checks whether `path` exists on `reference`. A 404 means absent;
    /// anything other than success or 404 is an error.
    pub async fn file_exists(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<bool, ApiError> {
        let url = self.contents_url(owner, repo, path);

        let response = self
            .client
            .get(&url)
            .query(&[("ref", reference)])
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(ApiError::Status { status, url });
        }

        Ok(true)
    }

    /// Replaces the contents of `path` on `branch`, expecting the file's
    /// current blob to still be `sha`.
    pub async fn update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        sha: &str,
        branch: &str,
    ) -> Result<(), ApiError> {
        let url = self.contents_url(owner, repo, path);

        let body = json!({
            "message": message,
            "content": STANDARD.encode(content),
            "sha": sha,
            "branch": branch,
        });

        let response = self
            .client
            .put(&url)
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(ApiError::Status { status, url });
        }

        Ok(())
    }

    /// Dispatches `workflow` on `reference`.
    pub async fn dispatch_workflow(
        &self,
        owner: &str,
        repo: &str,
        workflow: &str,
        reference: &str,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/repos/{}/{}/actions/workflows/{}/dispatches",
            self.base_url, owner, repo, workflow
        );

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .json(&json!({ "ref": reference }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(ApiError::Status { status, url });
        }

        Ok(())
    }
}
