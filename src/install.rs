use crate::error::InstallError;
use crate::platform::select_assets;
use crate::source::ReleaseSource;
use crate::types::*;
use crate::verify::verify;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory a given release of a tool is installed into.
///
/// Tags may contain slashes (e.g. "cli/v1.0.0"); those are flattened so the
/// tag always maps to a single directory under the tool's directory.
pub fn version_dir(root_dir: &Path, tool_name: &str, tag: &str) -> PathBuf {
    root_dir.join(tool_name).join(tag.replace('/', "__"))
}

/// Create `path` and any missing parents as 0755 (less the umask). Existing
/// directories keep their mode.
fn create_version_dir(path: &Path) -> Result<(), InstallError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder
        .create(path)
        .map_err(|e| InstallError::filesystem(path, e))
}

/// Materialize the selected assets as `destination_dir/<asset.name>`.
pub async fn acquire(
    source: &dyn ReleaseSource,
    selected: &SelectedAssets,
    destination_dir: &Path,
) -> Result<AcquiredAssets, InstallError> {
    create_version_dir(destination_dir)?;

    let assets = [selected.checksum.clone(), selected.binary.clone()];
    source.download_assets(&assets, destination_dir).await?;

    Ok(AcquiredAssets {
        binary_path: destination_dir.join(&selected.binary.name),
        checksum_path: destination_dir.join(&selected.checksum.name),
    })
}

/// Install the latest release of `tool_name` from `source` into
/// `<root_dir>/<tool_name>/<tag>`.
///
/// A checksum mismatch does not fail the install: the user is warned and
/// pointed at the manual download location instead.
pub async fn install_release(
    source: &dyn ReleaseSource,
    tool_name: &str,
    root_dir: &Path,
    platform: &PlatformInfo,
) -> Result<InstallReport, InstallError> {
    let release = source.fetch_latest_release().await?;
    tracing::debug!(
        "Resolving {} {} for {}",
        source.repo(),
        release.tag_name,
        platform
    );

    let selected = select_assets(&release.assets, &platform.os, &platform.arch)?;

    let dir = version_dir(root_dir, tool_name, &release.tag_name);
    tracing::debug!("Tool version directory: {}", dir.display());
    eprintln!("Installing {} {}...", tool_name, release.tag_name);

    let acquired = acquire(source, &selected, &dir).await?;
    let outcome = verify(&acquired.binary_path, &acquired.checksum_path)?;

    match &outcome {
        VerificationOutcome::Match { digest } => {
            tracing::info!(
                "Installed {} {} to {} (sha256 {})",
                tool_name,
                release.tag_name,
                dir.display(),
                digest
            );
        }
        VerificationOutcome::Mismatch { computed, expected } => {
            tracing::debug!(
                "Checksum mismatch for {}: computed {}, expected {}",
                selected.binary.name,
                computed,
                expected
            );
            println!(
                "WARNING: Checksum for {} does not match the calculated value. Please retry installation. If issue persists, this tool can be downloaded manually at {}",
                source.repo(),
                selected.binary.download_url
            );
        }
    }

    Ok(InstallReport {
        tag: release.tag_name,
        version_dir: dir,
        assets: acquired,
        download_url: selected.binary.download_url,
        outcome,
    })
}
