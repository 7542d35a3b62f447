use anyhow::{anyhow, Context, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Stream `url` into `local_path`.
///
/// The body is written to a temporary file next to `local_path` and only
/// renamed into place once the whole body arrived, so a failed transfer
/// never leaves a file under the final name.
pub async fn download_file(client: &reqwest::Client, url: &str, local_path: &Path) -> Result<()> {
    let filename = local_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("Invalid download path {}", local_path.display()))?;
    let parent = local_path
        .parent()
        .ok_or_else(|| anyhow!("Invalid download path {}", local_path.display()))?;

    tracing::info!("Downloading {}...", filename);
    tracing::debug!("Download URL: {}", url);

    let response = client
        .get(url)
        .header("User-Agent", "backplane-tools")
        .send()
        .await?
        .error_for_status()?;
    let total_size = response.content_length().unwrap_or(0);

    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Downloading {}", filename));

    let mut file = NamedTempFile::new_in(parent)
        .with_context(|| format!("Could not create temporary file in {}", parent.display()))?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush()?;
    file.persist(local_path)
        .with_context(|| format!("Could not move download into {}", local_path.display()))?;

    pb.finish_with_message("Download complete");
    Ok(())
}
