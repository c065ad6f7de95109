//! Relsync CLI library.
//!
//! This library provides the core functionality for the `relsync` command-line
//! interface: configuration management, command execution against a SQLite
//! database, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
