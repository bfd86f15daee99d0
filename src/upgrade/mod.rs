//! Self-update functionality for bookforge.
//!
//! This module lets the installed binary replace itself with the latest
//! GitHub release. The flow is strictly linear and runs at most once per
//! process, on explicit user request:
//!
//! ```text
//! 1. Skip check
//!    └── "dev" builds stop here, before any network access
//!
//! 2. Resolve
//!    └── GET <api>/releases/latest, extract the release tag
//!
//! 3. Compare
//!    ├── equal   -> up to date
//!    ├── newer   -> running ahead of the latest release
//!    └── older   -> continue
//!
//! 4. Download
//!    └── stream the platform asset into a staging directory next to the
//!        executable (renames cannot cross filesystems)
//!
//! 5. Extract
//!    └── pull the expected binary out of the tar.gz / zip container
//!
//! 6. Replace
//!    ├── rename the executable to <path>.old
//!    ├── rename the new binary into place
//!    └── restore the executable bit (roll back from .old on failure)
//! ```
//!
//! Every stage failure folds into [`UpdateOutcome::Failed`] instead of an
//! error: a failed self-update must never leave the tool less usable than
//! before. The one genuinely bad state, a failed swap whose rollback also
//! failed, is carried as a distinct unrecoverable failure so callers can
//! surface it loudly.
//!
//! # Module Structure
//!
//! - [`context`]: immutable per-invocation inputs (version, endpoints,
//!   platform, install path)
//! - [`version`]: lenient three-component version comparison
//! - [`release`]: latest-release metadata fetch
//! - [`asset`]: platform-specific archive and binary naming
//! - [`download`]: streaming asset download
//! - [`extract`]: tar.gz / zip binary extraction
//! - [`replace`]: the backup/swap/rollback sequence
//! - [`outcome`]: structured results and terminal rendering

pub mod asset;
pub mod context;
pub mod download;
pub mod extract;
pub mod outcome;
pub mod platform;
pub mod release;
pub mod replace;
pub mod version;

#[cfg(test)]
mod tests;

use std::cmp::Ordering;

use reqwest::Client;
use tracing::{debug, info};

use crate::core::UpdateError;

pub use context::UpdateContext;
pub use outcome::{UpdateFailure, UpdateOutcome};
pub use platform::PlatformTarget;
pub use replace::BinaryReplacer;

/// The latest tag and how the running version compares to it.
enum Resolution {
    DevBuild,
    Resolved {
        client: Client,
        latest: String,
        ordering: Ordering,
    },
}

/// Run the full update flow: resolve, compare, download, extract, replace.
pub async fn run(ctx: &UpdateContext) -> UpdateOutcome {
    let (client, latest) = match resolve(ctx).await {
        Ok(Resolution::DevBuild) => return skipped(ctx),
        Ok(Resolution::Resolved {
            client,
            latest,
            ordering,
        }) => match ordering {
            Ordering::Equal => return up_to_date(ctx),
            Ordering::Greater => return ahead_of_release(ctx, latest),
            Ordering::Less => (client, latest),
        },
        Err(e) => return UpdateOutcome::failed(e),
    };

    info!("update available: {} -> {latest}", ctx.current_version());
    match install_release(&client, ctx, &latest).await {
        Ok(()) => UpdateOutcome::Updated {
            previous: ctx.current_version().to_string(),
            installed: latest,
        },
        Err(e) => UpdateOutcome::failed_during(e, ctx.current_version(), &latest),
    }
}

/// Check-only variant of [`run`]: resolve and compare, but never download
/// or install anything.
pub async fn check(ctx: &UpdateContext) -> UpdateOutcome {
    match resolve(ctx).await {
        Ok(Resolution::DevBuild) => skipped(ctx),
        Ok(Resolution::Resolved {
            latest, ordering, ..
        }) => match ordering {
            Ordering::Equal => up_to_date(ctx),
            Ordering::Greater => ahead_of_release(ctx, latest),
            Ordering::Less => UpdateOutcome::UpdateAvailable {
                current: ctx.current_version().to_string(),
                latest,
            },
        },
        Err(e) => UpdateOutcome::failed(e),
    }
}

/// Fetch the latest tag and compare it against the running version.
///
/// Development builds resolve to [`Resolution::DevBuild`] before any
/// network access.
async fn resolve(ctx: &UpdateContext) -> Result<Resolution, UpdateError> {
    if ctx.is_dev_build() {
        debug!("development build; skipping self-update");
        return Ok(Resolution::DevBuild);
    }

    let client = release::http_client()?;
    let latest = release::fetch_latest_release(&client, ctx).await?.tag;
    let ordering = version::compare_versions(ctx.current_version(), &latest);
    Ok(Resolution::Resolved {
        client,
        latest,
        ordering,
    })
}

/// Stages 4-6: download the asset, extract the binary, swap it in.
///
/// The downloaded archive and the extraction directory live in one scoped
/// staging directory created next to the installed executable, removed
/// best-effort when this function returns, success or failure. The staging
/// location matters: the final swap is a rename, which cannot cross
/// filesystems, and the OS temp directory is often a different mount than
/// the install path.
async fn install_release(
    client: &Client,
    ctx: &UpdateContext,
    latest: &str,
) -> Result<(), UpdateError> {
    let spec = asset::AssetSpec::locate(ctx, latest);
    debug!("release asset: {}", spec.url);

    let replacer = BinaryReplacer::for_context(ctx)?;
    let staging_root =
        replacer.install_path().parent().ok_or_else(|| UpdateError::Filesystem {
            detail: format!(
                "install path {} has no parent directory",
                replacer.install_path().display()
            ),
        })?;
    let workspace = tempfile::Builder::new()
        .prefix(".bookforge-update")
        .tempdir_in(staging_root)
        .map_err(|e| UpdateError::Filesystem {
            detail: format!(
                "failed to create staging directory in {}: {e}",
                staging_root.display()
            ),
        })?;

    let archive_path = workspace.path().join(&spec.archive_name);
    download::download_asset(client, &spec.url, &archive_path).await?;

    let unpack_dir = workspace.path().join("unpacked");
    let binary =
        extract::extract_binary(&archive_path, &unpack_dir, &spec.binary_name, ctx.target())?
            .ok_or_else(|| UpdateError::BinaryNotFound {
                name: spec.binary_name.clone(),
            })?;

    replacer.install(&binary).await?;

    info!("installed {latest} over {}", ctx.current_version());
    Ok(())
    // `workspace` drops here, removing the archive and extraction directory.
}

fn skipped(ctx: &UpdateContext) -> UpdateOutcome {
    UpdateOutcome::Skipped {
        version: ctx.current_version().to_string(),
    }
}

fn up_to_date(ctx: &UpdateContext) -> UpdateOutcome {
    UpdateOutcome::UpToDate {
        version: ctx.current_version().to_string(),
    }
}

fn ahead_of_release(ctx: &UpdateContext, latest: String) -> UpdateOutcome {
    UpdateOutcome::AheadOfRelease {
        current: ctx.current_version().to_string(),
        latest,
    }
}
