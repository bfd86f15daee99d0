//! Core types shared across bookforge.
//!
//! Currently this is the error taxonomy used by the self-update subsystem;
//! see [`error::UpdateError`] for the full set of failure categories and
//! which of them are recoverable.

pub mod error;

pub use error::UpdateError;
