//! Release sources
//!
//! A release source lists the latest release of a repository and fetches the
//! bytes of its assets. The install pipeline only talks to this trait.

pub mod github;

use crate::error::{InstallError, SourceError};
use crate::types::{ReleaseAsset, ReleaseDescriptor};
use async_trait::async_trait;
use std::path::Path;

pub use github::GithubSource;

#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Repository in format "owner/repo"
    fn repo(&self) -> String;

    async fn fetch_latest_release(&self) -> Result<ReleaseDescriptor, SourceError>;

    /// Write each asset to `dir/<asset.name>`.
    async fn download_assets(&self, assets: &[ReleaseAsset], dir: &Path) -> Result<(), InstallError>;
}
