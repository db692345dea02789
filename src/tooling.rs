//! Tooling Layer
//!
//! Command-line entry points and text formatting for the navigation subsystem.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
