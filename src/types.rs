use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_root_dir")]
    pub root_dir: String,
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,
}

fn default_root_dir() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("bin")
        .join("backplane")
        .to_string_lossy()
        .to_string()
}

fn default_github_api_url() -> String {
    crate::source::github::DEFAULT_API_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            github_api_url: default_github_api_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BackplaneToolsConfig {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformInfo {
    pub os: String,
    pub arch: String,
}

impl fmt::Display for PlatformInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// A tagged release and its assets, in the order the provider listed them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Binary,
    Checksum,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Binary => write!(f, "binary"),
            AssetKind::Checksum => write!(f, "checksum"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedAssets {
    pub binary: ReleaseAsset,
    pub checksum: ReleaseAsset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredAssets {
    pub binary_path: PathBuf,
    pub checksum_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Match { digest: String },
    Mismatch { computed: String, expected: String },
}

impl VerificationOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, VerificationOutcome::Match { .. })
    }
}

/// What a finished install left on disk and how verification went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub tag: String,
    pub version_dir: PathBuf,
    pub assets: AcquiredAssets,
    pub download_url: String,
    pub outcome: VerificationOutcome,
}
