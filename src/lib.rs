//! cse - Local full-text code search library
//!
//! Shared modules for the cse CLI tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod indexer;
pub mod logging;
pub mod query;

use anyhow::Result;

use crate::config::RunConfig;

/// Resolve the run configuration from the raw argument vector and execute
/// the resolved command, returning its exit status.
pub fn run(argv: Vec<String>) -> Result<i32> {
    let (config, command) = RunConfig::resolve(argv)?;
    Ok(command.execute(&config))
}
