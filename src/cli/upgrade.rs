//! The `bookforge upgrade` command.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;

use crate::upgrade::{self, BinaryReplacer, UpdateContext};

/// Command-line arguments for the upgrade command.
///
/// The command runs in one of three modes:
///
/// - **Upgrade** (default): fetch the latest release and, if it is newer
///   than the running build, download and install it. The previous
///   executable is kept next to the new one as `<path>.old`.
/// - **Check** (`--check`): report whether a newer release exists without
///   downloading or installing anything.
/// - **Rollback** (`--rollback`): restore the executable from the `.old`
///   backup left by the last upgrade.
///
/// The command accepts no positional arguments; combining it with any, or
/// combining `--check` with `--rollback`, is a usage error.
#[derive(Parser, Debug)]
pub struct UpgradeArgs {
    /// Check for a newer release without installing it.
    #[arg(long)]
    pub check: bool,

    /// Restore the previous version from the backup left by the last
    /// upgrade.
    #[arg(long, conflicts_with = "check")]
    pub rollback: bool,
}

/// Execute the upgrade command.
///
/// Update failures are reported to the user and swallowed: a failed
/// self-update leaves the tool exactly as usable as before, so the process
/// exits successfully. The two exceptions are rollback problems (there is
/// nothing to degrade to) and the unrecoverable double fault, where the
/// executable itself may be missing.
pub async fn execute(args: UpgradeArgs) -> Result<()> {
    let ctx = UpdateContext::from_build_env();

    if args.rollback {
        return handle_rollback(&ctx).await;
    }

    println!("{}", "Checking for updates...".cyan());
    let outcome = if args.check {
        upgrade::check(&ctx).await
    } else {
        upgrade::run(&ctx).await
    };

    outcome.report();

    if outcome.is_unrecoverable() {
        bail!("self-update left the installation in an inconsistent state");
    }
    Ok(())
}

async fn handle_rollback(ctx: &UpdateContext) -> Result<()> {
    println!("{}", "Rolling back to the previous version...".yellow());

    let replacer = BinaryReplacer::for_context(ctx)
        .context("failed to locate the installed executable")?;

    if !replacer.backup_exists() {
        bail!("no backup found at {}", replacer.backup_path().display());
    }

    replacer.rollback().await.context("failed to restore from backup")?;

    println!("{}", "Successfully restored the previous version".green());
    Ok(())
}
