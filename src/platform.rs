use crate::error::SelectionError;
use crate::types::*;

/// Substring that marks an asset as a checksum companion.
const CHECKSUM_MARKER: &str = "sha256";

pub fn get_system_info() -> PlatformInfo {
    platform_from_consts(
        std::env::consts::OS,
        std::env::consts::ARCH,
        cfg!(target_endian = "little"),
    )
}

/// Map Rust target names onto the names release assets are published under
/// (Go's GOOS/GOARCH). Some of those carry the byte order in the name.
fn platform_from_consts(os: &str, arch: &str, little_endian: bool) -> PlatformInfo {
    let normalized_os = match os {
        "macos" => "darwin",
        other => other,
    };

    let normalized_arch = match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "loongarch64" => "loong64",
        "powerpc64" if little_endian => "ppc64le",
        "powerpc64" => "ppc64",
        "mips64" if little_endian => "mips64le",
        "mips" if little_endian => "mipsle",
        other => other,
    };

    PlatformInfo {
        os: normalized_os.to_string(),
        arch: normalized_arch.to_string(),
    }
}

/// Pick the single binary and the single checksum asset built for `os`/`arch`.
///
/// Matching is by substring, so an identifier that is contained in another
/// (e.g. `arm` within `arm64`) matches both. Ambiguity is never resolved by
/// picking one: a second candidate of either kind is an error.
pub fn select_assets(
    assets: &[ReleaseAsset],
    system_os: &str,
    system_arch: &str,
) -> Result<SelectedAssets, SelectionError> {
    tracing::trace!(
        "Looking for assets matching OS: '{}', ARCH: '{}'",
        system_os,
        system_arch
    );

    let mut binary: Option<&ReleaseAsset> = None;
    let mut checksum: Option<&ReleaseAsset> = None;

    for asset in assets {
        if !asset.name.contains(system_os) || !asset.name.contains(system_arch) {
            tracing::trace!("Skipping asset '{}'", asset.name);
            continue;
        }

        let (kind, slot) = if asset.name.contains(CHECKSUM_MARKER) {
            (AssetKind::Checksum, &mut checksum)
        } else {
            (AssetKind::Binary, &mut binary)
        };

        if let Some(existing) = slot.as_ref() {
            tracing::debug!(
                "Asset '{}' collides with '{}' as {}",
                asset.name,
                existing.name,
                kind
            );
            return Err(SelectionError::Duplicate(kind));
        }
        tracing::trace!("Asset '{}' is the {} candidate", asset.name, kind);
        *slot = Some(asset);
    }

    let binary = binary.ok_or(SelectionError::NotFound(AssetKind::Binary))?;
    let checksum = checksum.ok_or(SelectionError::NotFound(AssetKind::Checksum))?;

    tracing::info!(
        "Selected '{}' with checksum '{}'",
        binary.name,
        checksum.name
    );

    Ok(SelectedAssets {
        binary: binary.clone(),
        checksum: checksum.clone(),
    })
}
