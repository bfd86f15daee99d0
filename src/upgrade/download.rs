//! Streaming asset download.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::UpdateError;

/// Download the asset at `url` into `dest`, streaming the body chunk by
/// chunk.
///
/// The destination file is created fresh and its descriptor is closed when
/// this function returns, on every path. A partial write is a download
/// failure, never partial success: the caller owns `dest` as part of a
/// scoped temporary directory and abandons it wholesale on error. Returns
/// the number of bytes written.
pub async fn download_asset(client: &Client, url: &str, dest: &Path) -> Result<u64, UpdateError> {
    debug!("downloading {url} to {}", dest.display());

    let mut response = client.get(url).send().await.map_err(|e| UpdateError::Network {
        detail: format!("request to {url} failed: {e}"),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(download_status_error(status, url));
    }

    let progress = response.content_length().map(byte_progress);
    let mut file = tokio::fs::File::create(dest).await.map_err(|e| UpdateError::Filesystem {
        detail: format!("failed to create {}: {e}", dest.display()),
    })?;

    let mut written = 0u64;
    loop {
        let chunk = match response.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                return Err(UpdateError::Network {
                    detail: format!("download from {url} interrupted: {e}"),
                });
            }
        };

        file.write_all(&chunk).await.map_err(|e| UpdateError::Filesystem {
            detail: format!("failed writing {}: {e}", dest.display()),
        })?;
        written += chunk.len() as u64;
        if let Some(bar) = &progress {
            bar.inc(chunk.len() as u64);
        }
    }

    file.flush().await.map_err(|e| UpdateError::Filesystem {
        detail: format!("failed writing {}: {e}", dest.display()),
    })?;
    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }

    debug!("downloaded {written} bytes");
    Ok(written)
}

fn download_status_error(status: StatusCode, url: &str) -> UpdateError {
    if status == StatusCode::FORBIDDEN {
        UpdateError::RateLimited
    } else {
        UpdateError::Download {
            status: status.as_u16(),
            url: url.to_string(),
        }
    }
}

fn byte_progress(total: u64) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .unwrap()
        .progress_chars("━╸━");
    ProgressBar::new(total).with_style(style).with_prefix("Downloading")
}
