//! Backing up and swapping the installed executable.
//!
//! Replacement is a four-step sequence with a defined response at every
//! failure point, visible in the error variant it produces:
//!
//! 1. **Resolve** the install path ([`BinaryReplacer::for_context`]).
//!    Failure is [`UpdateError::Filesystem`]; nothing has been touched.
//! 2. **Backup**: rename the executable to `<path>.old`. Failure is
//!    [`UpdateError::Filesystem`]; nothing has been touched.
//! 3. **Swap**: rename the new binary into the install path. This is the
//!    one failure point with an active recovery: the backup is renamed
//!    back, yielding [`UpdateError::SwapRolledBack`] when the recovery
//!    works and [`UpdateError::Unrecoverable`] when it does not.
//! 4. **Permissions**: restore the executable bit. Failure is a warning
//!    only; the update has already committed.
//!
//! After a successful swap the `.old` backup is left on disk so that
//! `bookforge upgrade --rollback` can restore it later.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use crate::core::UpdateError;

use super::context::UpdateContext;

/// Swaps a replacement binary into the install path with backup and
/// rollback.
#[derive(Debug)]
pub struct BinaryReplacer {
    install_path: PathBuf,
    backup_path: PathBuf,
}

impl BinaryReplacer {
    /// Resolve the install path from the context: the injected override if
    /// present, otherwise the running executable.
    pub fn for_context(ctx: &UpdateContext) -> Result<Self, UpdateError> {
        let install_path = match ctx.install_path() {
            Some(path) => path.to_path_buf(),
            None => std::env::current_exe().map_err(|e| UpdateError::Filesystem {
                detail: format!("failed to resolve the running executable: {e}"),
            })?,
        };
        Ok(Self::new(install_path))
    }

    /// Create a replacer for an explicit install path. The backup lives
    /// next to it as `<path>.old`.
    pub fn new(install_path: PathBuf) -> Self {
        let mut backup_path = install_path.clone();
        backup_path.set_file_name(format!(
            "{}.old",
            install_path.file_name().unwrap_or_default().to_string_lossy()
        ));

        Self {
            install_path,
            backup_path,
        }
    }

    /// The path being replaced.
    pub fn install_path(&self) -> &Path {
        &self.install_path
    }

    /// Where the previous executable is kept after a successful swap.
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Whether a backup from an earlier update is present.
    pub fn backup_exists(&self) -> bool {
        self.backup_path.exists()
    }

    /// Run steps 2-4: backup, swap, restore permissions.
    ///
    /// On success the new binary sits at the install path with the
    /// executable bit set and the previous one remains at
    /// [`backup_path`](Self::backup_path). See the module docs for what
    /// each failure leaves behind.
    pub async fn install(&self, replacement: &Path) -> Result<(), UpdateError> {
        debug!(
            "backing up {} to {}",
            self.install_path.display(),
            self.backup_path.display()
        );
        fs::rename(&self.install_path, &self.backup_path).await.map_err(|e| {
            UpdateError::Filesystem {
                detail: format!("failed to back up {}: {e}", self.install_path.display()),
            }
        })?;

        debug!(
            "swapping {} into {}",
            replacement.display(),
            self.install_path.display()
        );
        if let Err(swap_err) = fs::rename(replacement, &self.install_path).await {
            warn!("swap failed: {swap_err}; restoring the previous executable");
            return match fs::rename(&self.backup_path, &self.install_path).await {
                Ok(()) => Err(UpdateError::SwapRolledBack {
                    detail: swap_err.to_string(),
                }),
                Err(restore_err) => Err(UpdateError::Unrecoverable {
                    swap_detail: swap_err.to_string(),
                    restore_detail: restore_err.to_string(),
                    install_path: self.install_path.display().to_string(),
                    backup_path: self.backup_path.display().to_string(),
                }),
            };
        }

        if let Err(e) = self.restore_exec_permissions().await {
            warn!(
                "could not restore executable permissions on {}: {e}",
                self.install_path.display()
            );
        }

        Ok(())
    }

    /// Restore the previous executable from the `.old` backup.
    pub async fn rollback(&self) -> Result<(), UpdateError> {
        if !self.backup_exists() {
            return Err(UpdateError::Filesystem {
                detail: format!("no backup found at {}", self.backup_path.display()),
            });
        }

        warn!(
            "restoring {} from {}",
            self.install_path.display(),
            self.backup_path.display()
        );
        fs::rename(&self.backup_path, &self.install_path).await.map_err(|e| {
            UpdateError::Filesystem {
                detail: format!("failed to restore backup: {e}"),
            }
        })
    }

    #[cfg(unix)]
    async fn restore_exec_permissions(&self) -> std::io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(&self.install_path, std::fs::Permissions::from_mode(0o755)).await
    }

    #[cfg(not(unix))]
    async fn restore_exec_permissions(&self) -> std::io::Result<()> {
        Ok(())
    }
}
