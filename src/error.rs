use crate::types::AssetKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("failed to find the {0} asset for this platform")]
    NotFound(AssetKind),
    #[error("detected duplicate {0} assets for this platform")]
    Duplicate(AssetKind),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No releases found for {repo}")]
    NotFound { repo: String },
    #[error("Failed to get release info for {repo}: {status}")]
    RequestFailed {
        repo: String,
        status: reqwest::StatusCode,
    },
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("filesystem operation on '{}' failed", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to download asset '{asset}'")]
    Download {
        asset: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl InstallError {
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        InstallError::Filesystem {
            path: path.into(),
            source,
        }
    }
}
