use super::Tool;
use crate::error::InstallError;
use crate::install::install_release;
use crate::source::{GithubSource, ReleaseSource};
use crate::types::PlatformInfo;
use async_trait::async_trait;
use std::path::Path;

const OWNER: &str = "openshift-online";
const REPO: &str = "ocm-cli";

/// Manages the `ocm-cli` binary.
pub struct OcmTool {
    source: Box<dyn ReleaseSource>,
    platform: PlatformInfo,
}

impl OcmTool {
    pub fn new(api_url: &str, platform: PlatformInfo) -> Self {
        Self::with_source(
            Box::new(GithubSource::with_api_url(OWNER, REPO, api_url)),
            platform,
        )
    }

    pub fn with_source(source: Box<dyn ReleaseSource>, platform: PlatformInfo) -> Self {
        Self { source, platform }
    }
}

#[async_trait]
impl Tool for OcmTool {
    fn name(&self) -> &'static str {
        "ocm"
    }

    async fn install(&self, root_dir: &Path) -> Result<(), InstallError> {
        let report =
            install_release(self.source.as_ref(), self.name(), root_dir, &self.platform).await?;
        tracing::debug!(
            "{} {} at {} (verified: {}, source: {})",
            self.name(),
            report.tag,
            report.version_dir.display(),
            report.outcome.is_match(),
            report.download_url
        );
        Ok(())
    }
}
