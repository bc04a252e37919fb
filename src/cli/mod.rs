//! CLI module for the employee API
//!
//! Process start: load `.env`, install logging, read configuration,
//! connect to the store, then serve HTTP until shutdown.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::{run, serve, ServeConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
