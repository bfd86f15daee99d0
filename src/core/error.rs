//! Error taxonomy for the self-update subsystem.
//!
//! Every stage of the update flow reports its failures through
//! [`UpdateError`]. The variants map one-to-one onto the ways the flow can
//! go wrong: transport problems, unexpected HTTP statuses (with the GitHub
//! rate limit singled out), malformed release metadata, broken or
//! incomplete archives, and filesystem trouble while staging or swapping
//! the binary.
//!
//! With one exception, all of these are *soft*: the orchestrator folds them
//! into a failed [`UpdateOutcome`](crate::upgrade::UpdateOutcome), the user
//! gets a diagnostic plus a manual-install fallback, and the process
//! continues as if no update had been attempted. The exception is
//! [`UpdateError::Unrecoverable`]: the new binary could not be moved into
//! place *and* the backed-up executable could not be restored, so the
//! installation itself may be broken. Callers must surface that case
//! distinctly rather than treat it like the rest.

use thiserror::Error;

/// Failure categories for the self-update flow.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Transport-level failure: connection refused, DNS, TLS, timeouts,
    /// or an interrupted body read.
    #[error("network error: {detail}")]
    Network {
        /// Description of the underlying transport failure
        detail: String,
    },

    /// The release feed answered with a non-2xx status other than 403.
    #[error("release feed returned HTTP {status} for {url}")]
    Status {
        /// The HTTP status code received
        status: u16,
        /// The URL that produced the status
        url: String,
    },

    /// The release feed answered 403, which for the unauthenticated GitHub
    /// API almost always means the rate limit was hit.
    #[error("release feed returned HTTP 403: GitHub API rate limit exceeded")]
    RateLimited,

    /// The asset download answered with a non-2xx status other than 403.
    #[error("download failed: HTTP {status} for {url}")]
    Download {
        /// The HTTP status code received
        status: u16,
        /// The asset URL that produced the status
        url: String,
    },

    /// The release metadata body was not the JSON document we expect.
    #[error("malformed release metadata: {detail}")]
    Parse {
        /// Description of the parse failure
        detail: String,
    },

    /// The downloaded archive could not be read: bad gzip stream, bad zip
    /// central directory, or an I/O error while scanning entries.
    #[error("could not unpack the release archive: {detail}")]
    Archive {
        /// Description of the container failure
        detail: String,
    },

    /// The archive opened cleanly but held no entry with the expected
    /// binary name. Same severity as a corrupt archive, distinct message.
    #[error("release archive does not contain '{name}'")]
    BinaryNotFound {
        /// The binary name that was expected inside the archive
        name: String,
    },

    /// Filesystem failure outside the swap itself: resolving the running
    /// executable, creating temp files or directories, or the backup
    /// rename (which leaves the installation untouched when it fails).
    #[error("filesystem error: {detail}")]
    Filesystem {
        /// Description of the filesystem failure
        detail: String,
    },

    /// The swap rename failed after the backup succeeded, and the recovery
    /// transition put the previous executable back. The tool still works;
    /// the update simply did not happen.
    #[error("could not install the new binary ({detail}); the previous executable was restored")]
    SwapRolledBack {
        /// Description of the failed swap rename
        detail: String,
    },

    /// Double fault: the swap failed and renaming the backup over the
    /// install path failed too. The executable may be missing entirely and
    /// only manual intervention can repair it.
    #[error(
        "could not install the new binary ({swap_detail}) and restoring the backup failed \
         ({restore_detail}); {install_path} may be missing, backup kept at {backup_path}"
    )]
    Unrecoverable {
        /// Description of the failed swap rename
        swap_detail: String,
        /// Description of the failed restore rename
        restore_detail: String,
        /// The install path that may no longer hold an executable
        install_path: String,
        /// Where the previous executable still lives
        backup_path: String,
    },
}

impl UpdateError {
    /// Whether this failure left the installation in a state that manual
    /// reinstallation alone can fix.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, Self::Unrecoverable { .. })
    }
}
