//! Latest-release resolution against the GitHub API.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::core::UpdateError;

use super::context::UpdateContext;

/// The remote release descriptor, reduced to the one field the update flow
/// needs: the release tag.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseInfo {
    /// The release tag (a version string, typically `v`-prefixed).
    #[serde(rename = "tag_name")]
    pub tag: String,
}

/// Build the HTTP client shared by the metadata fetch and the asset
/// download.
///
/// The GitHub API rejects requests without a User-Agent, so one is always
/// set. No explicit timeout is configured; the transport default applies.
pub(crate) fn http_client() -> Result<Client, UpdateError> {
    Client::builder()
        .user_agent(format!("bookforge/{}", super::context::BUILD_VERSION))
        .build()
        .map_err(|e| UpdateError::Network {
            detail: format!("failed to construct HTTP client: {e}"),
        })
}

/// Fetch the latest-release descriptor with a single GET.
///
/// Every failure mode is soft and maps onto the taxonomy in
/// [`UpdateError`]: transport problems become [`UpdateError::Network`], a
/// 403 becomes the distinguished [`UpdateError::RateLimited`], other non-2xx
/// statuses become [`UpdateError::Status`], and an unreadable or malformed
/// body becomes [`UpdateError::Network`] / [`UpdateError::Parse`].
pub async fn fetch_latest_release(
    client: &Client,
    ctx: &UpdateContext,
) -> Result<ReleaseInfo, UpdateError> {
    let url = ctx.latest_release_url();
    debug!("fetching latest release from {url}");

    let response = client.get(&url).send().await.map_err(|e| UpdateError::Network {
        detail: format!("request to {url} failed: {e}"),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(feed_status_error(status, &url));
    }

    let release: ReleaseInfo = response.json().await.map_err(|e| {
        if e.is_decode() {
            UpdateError::Parse { detail: e.to_string() }
        } else {
            UpdateError::Network {
                detail: format!("failed to read release metadata: {e}"),
            }
        }
    })?;

    debug!("latest release tag: {}", release.tag);
    Ok(release)
}

fn feed_status_error(status: StatusCode, url: &str) -> UpdateError {
    if status == StatusCode::FORBIDDEN {
        UpdateError::RateLimited
    } else {
        UpdateError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        }
    }
}
