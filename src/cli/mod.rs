//! CLI module
//!
//! Command-line interface for the repository janitor.
//!
//! # Commands
//!
//! - `list` - Save a user's repository names to a JSON file
//! - `delete` - Delete the repositories named in a JSON file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;

#[cfg(test)]
mod tests;
