//! GitHub API interaction module
//!
//! Queries the latest release of a repository and downloads release assets.

use super::ReleaseSource;
use crate::download::download_file;
use crate::error::{InstallError, SourceError};
use crate::types::{ReleaseAsset, ReleaseDescriptor};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::path::Path;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct GithubSource {
    owner: String,
    repo: String,
    api_url: String,
    client: reqwest::Client,
}

impl GithubSource {
    pub fn with_api_url(owner: &str, repo: &str, api_url: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn latest_release_url(&self) -> String {
        build_latest_release_url(&self.api_url, &self.repo())
    }
}

/// Build GitHub API URL for fetching the latest release
///
/// # Arguments
/// * `api_url` - API base, e.g. "https://api.github.com"
/// * `repo` - Repository in format "owner/repo"
pub fn build_latest_release_url(api_url: &str, repo: &str) -> String {
    format!("{}/repos/{}/releases/latest", api_url, repo)
}

#[async_trait]
impl ReleaseSource for GithubSource {
    fn repo(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    async fn fetch_latest_release(&self) -> Result<ReleaseDescriptor, SourceError> {
        let url = self.latest_release_url();
        tracing::debug!("Fetching GitHub release info from: {}", url);

        let transport = |source| SourceError::Transport {
            url: url.clone(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "backplane-tools")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                return Err(SourceError::NotFound { repo: self.repo() });
            }
            return Err(SourceError::RequestFailed {
                repo: self.repo(),
                status,
            });
        }

        let release: ReleaseDescriptor = response.json().await.map_err(transport)?;
        tracing::info!(
            "Latest release of {} is {} with {} assets",
            self.repo(),
            release.tag_name,
            release.assets.len()
        );
        Ok(release)
    }

    async fn download_assets(&self, assets: &[ReleaseAsset], dir: &Path) -> Result<(), InstallError> {
        for asset in assets {
            let local_path = dir.join(&asset.name);
            download_file(&self.client, &asset.download_url, &local_path)
                .await
                .map_err(|e| InstallError::Download {
                    asset: asset.name.clone(),
                    source: e.into(),
                })?;
        }
        Ok(())
    }
}
