//! Command-line interface for bookforge.
//!
//! Argument parsing is the one place where failures are hard errors: an
//! unknown flag, a stray positional argument, or a conflicting flag
//! combination aborts with a usage message before the update subsystem is
//! ever entered. Everything past parsing follows the subsystem's
//! graceful-degrade policy instead.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::upgrade::context;

pub mod upgrade;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "bookforge",
    version = context::BUILD_VERSION,
    about = "Audiobook library conversion tool",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Update bookforge to the latest released version
    #[command(alias = "self-update")]
    Upgrade(upgrade::UpgradeArgs),
}

impl Cli {
    /// Dispatch the parsed command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Upgrade(args) => upgrade::execute(args).await,
        }
    }
}
