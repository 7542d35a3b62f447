//! SHA-256 verification of a downloaded binary against its published checksum.

use crate::error::InstallError;
use crate::types::VerificationOutcome;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Buffer size for reading files during checksum calculation (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Calculate the lowercase hex SHA-256 digest of a file's contents.
pub fn calculate_file_checksum(path: &Path) -> Result<String, InstallError> {
    let mut file = File::open(path).map_err(|e| InstallError::filesystem(path, e))?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| InstallError::filesystem(path, e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// First whitespace-delimited token of a checksum file, conventionally
/// `<digest>  <filename>`. Blank content yields an empty string.
pub fn expected_digest(checksum_text: &str) -> &str {
    checksum_text.split_whitespace().next().unwrap_or("")
}

/// Compare the binary at `binary_path` with the digest published in
/// `checksum_path`.
///
/// A mismatch is an outcome, not an error. Only I/O failures are errors.
pub fn verify(binary_path: &Path, checksum_path: &Path) -> Result<VerificationOutcome, InstallError> {
    let computed = calculate_file_checksum(binary_path)?;
    println!("sum: {}", computed);

    let checksum_text =
        fs::read_to_string(checksum_path).map_err(|e| InstallError::filesystem(checksum_path, e))?;
    let expected = expected_digest(&checksum_text);
    println!("checksum: {}", expected);

    if computed.trim() == expected.trim() {
        tracing::debug!("Checksum of {} verified", binary_path.display());
        Ok(VerificationOutcome::Match { digest: computed })
    } else {
        Ok(VerificationOutcome::Mismatch {
            computed,
            expected: expected.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    // SHA-256 of "hello world"
    const HELLO_WORLD_SHA256: &str =
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_calculate_file_checksum() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "test.txt", b"hello world");

        assert_eq!(calculate_file_checksum(&path).unwrap(), HELLO_WORLD_SHA256);
    }

    #[test]
    fn test_calculate_file_checksum_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "empty", b"");

        assert_eq!(
            calculate_file_checksum(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_expected_digest_takes_first_token() {
        assert_eq!(expected_digest("abc123  ocm-cli_linux_amd64\n"), "abc123");
        assert_eq!(expected_digest("  abc123\tocm\n"), "abc123");
        assert_eq!(expected_digest("abc123\n"), "abc123");
        assert_eq!(expected_digest(""), "");
        assert_eq!(expected_digest(" \n\t"), "");
    }

    #[test]
    fn test_verify_match() {
        let temp = TempDir::new().unwrap();
        let binary = write_file(&temp, "ocm-cli_linux_amd64", b"hello world");
        let checksum = write_file(
            &temp,
            "ocm-cli_linux_amd64.sha256",
            format!("{}  ocm-cli_linux_amd64\n", HELLO_WORLD_SHA256).as_bytes(),
        );

        let outcome = verify(&binary, &checksum).unwrap();
        assert_eq!(
            outcome,
            VerificationOutcome::Match {
                digest: HELLO_WORLD_SHA256.to_string()
            }
        );
    }

    #[test]
    fn test_verify_match_bare_digest() {
        let temp = TempDir::new().unwrap();
        let binary = write_file(&temp, "bin", b"hello world");
        let checksum = write_file(&temp, "bin.sha256", HELLO_WORLD_SHA256.as_bytes());

        assert!(verify(&binary, &checksum).unwrap().is_match());
    }

    #[test]
    fn test_verify_mismatch() {
        let temp = TempDir::new().unwrap();
        let binary = write_file(&temp, "ocm-cli_linux_amd64", b"hello world");
        let checksum = write_file(
            &temp,
            "ocm-cli_linux_amd64.sha256",
            b"deadbeef  ocm-cli_linux_amd64\n",
        );

        let outcome = verify(&binary, &checksum).unwrap();
        assert_eq!(
            outcome,
            VerificationOutcome::Mismatch {
                computed: HELLO_WORLD_SHA256.to_string(),
                expected: "deadbeef".to_string(),
            }
        );
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        let binary = write_file(&temp, "bin", b"hello world");
        let checksum = write_file(
            &temp,
            "bin.sha256",
            HELLO_WORLD_SHA256.to_uppercase().as_bytes(),
        );

        assert!(!verify(&binary, &checksum).unwrap().is_match());
    }

    #[test]
    fn test_verify_missing_binary_is_error() {
        let temp = TempDir::new().unwrap();
        let checksum = write_file(&temp, "bin.sha256", b"deadbeef");
        let missing = temp.path().join("bin");

        match verify(&missing, &checksum) {
            Err(InstallError::Filesystem { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected filesystem error, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_missing_checksum_is_error() {
        let temp = TempDir::new().unwrap();
        let binary = write_file(&temp, "bin", b"hello world");
        let missing = temp.path().join("bin.sha256");

        match verify(&binary, &missing) {
            Err(InstallError::Filesystem { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected filesystem error, got {:?}", other),
        }
    }
}
