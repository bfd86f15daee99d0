//! Structured update outcomes and their terminal rendering.
//!
//! The update flow communicates results as values, not as printed text, so
//! callers and tests can match on what actually happened. Rendering is a
//! separate, optional step: [`UpdateOutcome::render`] produces the
//! user-facing lines and [`UpdateOutcome::report`] prints them.

use colored::Colorize;

use crate::core::UpdateError;

use super::context;

/// What one invocation of the update flow amounted to.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// Development build; the flow stopped before any network access.
    Skipped {
        /// The sentinel version of the running build
        version: String,
    },
    /// The running build matches the latest release.
    UpToDate {
        /// The shared version
        version: String,
    },
    /// The running build is newer than the latest published release.
    AheadOfRelease {
        /// Version of the running build
        current: String,
        /// Tag of the latest release
        latest: String,
    },
    /// Check-only mode found a newer release without installing it.
    UpdateAvailable {
        /// Version of the running build
        current: String,
        /// Tag of the newer release
        latest: String,
    },
    /// The new binary is installed; a restart picks it up.
    Updated {
        /// Version that was running
        previous: String,
        /// Tag that is now installed
        installed: String,
    },
    /// A stage failed and the flow degraded gracefully (or, for the
    /// unrecoverable double fault, as gracefully as it could).
    Failed(UpdateFailure),
}

/// A failed flow, with enough context to render a useful diagnostic.
#[derive(Debug)]
pub struct UpdateFailure {
    /// The stage failure itself.
    pub error: UpdateError,
    /// `(current, latest)` when the release feed had already answered, so
    /// the report can say what was available before the failing stage.
    pub available: Option<(String, String)>,
}

impl UpdateOutcome {
    pub(crate) fn failed(error: UpdateError) -> Self {
        Self::Failed(UpdateFailure {
            error,
            available: None,
        })
    }

    pub(crate) fn failed_during(error: UpdateError, current: &str, latest: &str) -> Self {
        Self::Failed(UpdateFailure {
            error,
            available: Some((current.to_string(), latest.to_string())),
        })
    }

    /// Whether the flow ended in the unrecoverable double-fault state.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, Self::Failed(failure) if failure.error.is_unrecoverable())
    }

    /// The user-facing message, one string per terminal line, in print
    /// order.
    pub fn render(&self) -> Vec<String> {
        match self {
            Self::Skipped { version } => vec![
                format!("Skipping self-update: this is a development build ({version})")
                    .yellow()
                    .to_string(),
            ],
            Self::UpToDate { version } => {
                vec![format!("bookforge is up to date ({version})").green().to_string()]
            }
            Self::AheadOfRelease { current, latest } => vec![
                format!(
                    "You are running a newer version ({current}) than the latest release ({latest})"
                )
                .yellow()
                .to_string(),
            ],
            Self::UpdateAvailable { current, latest } => vec![
                format!("Update available: {current} -> {latest}").green().to_string(),
                "Run `bookforge upgrade` to install it".to_string(),
            ],
            Self::Updated {
                previous,
                installed,
            } => vec![
                format!("Updated bookforge {previous} -> {installed}").green().to_string(),
                "Restart bookforge to run the new version".to_string(),
            ],
            Self::Failed(failure) => failure.render(),
        }
    }

    /// Print the rendered outcome: successes to stdout, failures to stderr.
    pub fn report(&self) {
        let lines = self.render();
        if matches!(self, Self::Failed(_)) {
            for line in lines {
                eprintln!("{line}");
            }
        } else {
            for line in lines {
                println!("{line}");
            }
        }
    }
}

impl UpdateFailure {
    fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some((current, latest)) = &self.available {
            lines.push(format!("Update available: {current} -> {latest}").cyan().to_string());
        }

        if self.error.is_unrecoverable() {
            lines.push(format!("Self-update failed: {}", self.error).red().bold().to_string());
            lines.push(
                "The installed executable may be missing; reinstall it manually before running \
                 bookforge again."
                    .red()
                    .to_string(),
            );
            lines.push(format!("Manual downloads: {}", context::RELEASES_PAGE));
        } else {
            lines.push(format!("Self-update failed: {}", self.error).red().to_string());
            lines.push(format!(
                "You can install the latest release manually from {}",
                context::RELEASES_PAGE
            ));
        }
        lines
    }
}
