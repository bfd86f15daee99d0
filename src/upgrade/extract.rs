//! Locating the new binary inside a release archive.
//!
//! Non-Windows assets are gzip-compressed tarballs; Windows assets are zip
//! files. Either way the archive is expected to hold exactly one
//! interesting entry, the replacement binary, and everything else in it is
//! ignored. The tar path scans entries sequentially and stops at the first
//! regular file whose base name matches; the zip path looks the entry up by
//! its full stored name.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::debug;

use crate::core::UpdateError;

use super::platform::PlatformTarget;

/// Unpack the expected binary out of `archive_path` into `dest_dir`.
///
/// Returns `Ok(Some(path))` with the extracted binary's location,
/// `Ok(None)` when the archive opened cleanly but contained no entry with
/// the expected name, and `Err` for corrupt containers or I/O failures
/// mid-read. Callers treat the `None` and `Err` cases with identical
/// severity; only the message differs.
pub fn extract_binary(
    archive_path: &Path,
    dest_dir: &Path,
    expected: &str,
    target: &PlatformTarget,
) -> Result<Option<PathBuf>, UpdateError> {
    std::fs::create_dir_all(dest_dir).map_err(|e| UpdateError::Filesystem {
        detail: format!("failed to create {}: {e}", dest_dir.display()),
    })?;

    if target.is_windows() {
        extract_from_zip(archive_path, dest_dir, expected)
    } else {
        extract_from_tar_gz(archive_path, dest_dir, expected)
    }
}

/// Sequential scan of a gzip-compressed tarball.
///
/// `tar::Entry::unpack` preserves the mode bits declared in the entry
/// header, so a binary packaged as 0o755 comes out executable.
fn extract_from_tar_gz(
    archive_path: &Path,
    dest_dir: &Path,
    expected: &str,
) -> Result<Option<PathBuf>, UpdateError> {
    let file = File::open(archive_path).map_err(|e| UpdateError::Archive {
        detail: format!("failed to open {}: {e}", archive_path.display()),
    })?;
    let mut archive = Archive::new(GzDecoder::new(file));

    let entries = archive.entries().map_err(|e| UpdateError::Archive {
        detail: format!("failed to read tar entries: {e}"),
    })?;

    for entry in entries {
        let mut entry = entry.map_err(|e| UpdateError::Archive {
            detail: format!("failed to read tar entry: {e}"),
        })?;

        if !entry.header().entry_type().is_file() {
            continue;
        }

        let matches = {
            let path = entry.path().map_err(|e| UpdateError::Archive {
                detail: format!("failed to read tar entry path: {e}"),
            })?;
            path.file_name().and_then(|n| n.to_str()) == Some(expected)
        };
        if !matches {
            continue;
        }

        let out = dest_dir.join(expected);
        entry.unpack(&out).map_err(|e| UpdateError::Archive {
            detail: format!("failed to extract '{expected}': {e}"),
        })?;
        debug!("extracted {} from tarball", out.display());
        return Ok(Some(out));
    }

    Ok(None)
}

/// Random-access lookup in a zip archive by full stored name.
fn extract_from_zip(
    archive_path: &Path,
    dest_dir: &Path,
    expected: &str,
) -> Result<Option<PathBuf>, UpdateError> {
    let file = File::open(archive_path).map_err(|e| UpdateError::Archive {
        detail: format!("failed to open {}: {e}", archive_path.display()),
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| UpdateError::Archive {
        detail: format!("failed to read zip archive: {e}"),
    })?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| UpdateError::Archive {
            detail: format!("failed to read zip entry {index}: {e}"),
        })?;
        if entry.name() != expected {
            continue;
        }

        let out = dest_dir.join(expected);
        let mut outfile = File::create(&out).map_err(|e| UpdateError::Filesystem {
            detail: format!("failed to create {}: {e}", out.display()),
        })?;
        io::copy(&mut entry, &mut outfile).map_err(|e| UpdateError::Archive {
            detail: format!("failed to extract '{expected}': {e}"),
        })?;
        debug!("extracted {} from zip archive", out.display());
        return Ok(Some(out));
    }

    Ok(None)
}
