//! bookforge - audiobook library conversion tool
//!
//! bookforge converts audiobook libraries between container formats by
//! orchestrating an external audio encoder. It is distributed as a single
//! static binary from GitHub releases, and this crate contains the part of
//! the tool that keeps that binary current: the self-update subsystem.
//!
//! # Architecture Overview
//!
//! The update flow is strictly linear. An immutable [`upgrade::UpdateContext`]
//! describes the running build (version, platform, release endpoints), and
//! [`upgrade::run`] walks it through the stages:
//!
//! ```text
//! resolve latest release -> compare versions -> download asset
//!     -> extract binary -> back up + swap the executable
//! ```
//!
//! Every stage failure degrades gracefully into a structured
//! [`upgrade::UpdateOutcome`] instead of an error: a failed self-update must
//! never leave the user worse off than not updating at all. The single
//! exception is a failed swap whose rollback also fails, which is surfaced
//! as an unrecoverable outcome because the installed executable may be gone.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (`bookforge upgrade` and its flags)
//! - [`core`] - Error taxonomy shared by the update stages
//! - [`upgrade`] - Release resolution, download, extraction, and the
//!   backup/swap/rollback state machine
//!
//! # Command-Line Usage
//!
//! ```bash
//! bookforge upgrade            # update to the latest release
//! bookforge upgrade --check    # report whether an update exists
//! bookforge upgrade --rollback # restore the previous executable
//! ```

pub mod cli;
pub mod core;
pub mod upgrade;
