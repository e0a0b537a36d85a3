// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::DownloadError;
use crate::types::is_absent;
use std::path::Path;
use tokio::io::AsyncWriteExt as _;

/// What [`fetch_poster`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterOutcome {
    /// The destination already existed and was left untouched.
    AlreadyPresent,
    /// The record had no poster URL; nothing was written.
    NoPoster,
    /// The poster was downloaded.
    Downloaded { bytes: u64 },
}

/// Makes sure the poster for a movie is on disk.
///
/// An existing `dest` is never re-fetched or checked, so reruns are cheap.
/// On any failure the partially written file is removed before the error is
/// returned.
pub async fn fetch_poster(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
) -> Result<PosterOutcome, DownloadError> {
    if tokio::fs::try_exists(dest).await.unwrap_or(false) {
        log::info!("Poster already exists: {}", dest.display());
        return Ok(PosterOutcome::AlreadyPresent);
    }

    if is_absent(url) {
        log::info!("No poster available for this movie");
        return Ok(PosterOutcome::NoPoster);
    }

    log::info!("Downloading poster from {url}...");
    match stream_to_file(client, url, dest).await {
        Ok(bytes) => {
            log::info!("Poster downloaded: {} ({bytes} bytes)", dest.display());
            Ok(PosterOutcome::Downloaded { bytes })
        }
        Err(e) => {
            log::error!("Error downloading poster: {e}");
            remove_partial(dest).await;
            Err(e)
        }
    }
}

async fn stream_to_file(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
) -> Result<u64, DownloadError> {
    let request_error = |source: reqwest::Error| DownloadError::Request {
        url: url.to_owned(),
        source,
    };
    let write_error = |source: std::io::Error| DownloadError::Write {
        path: dest.to_path_buf(),
        source,
    };

    let mut response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(request_error)?;

    let mut file = tokio::fs::File::create(dest).await.map_err(write_error)?;
    let mut written = 0_u64;

    while let Some(chunk) = response.chunk().await.map_err(request_error)? {
        file.write_all(&chunk).await.map_err(write_error)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(write_error)?;

    Ok(written)
}

/// Best-effort cleanup; a failed removal is only logged.
async fn remove_partial(dest: &Path) {
    match tokio::fs::remove_file(dest).await {
        Ok(()) => log::debug!("Removed partial poster {}", dest.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::debug!("Could not remove partial poster {}: {e}", dest.display()),
    }
}
