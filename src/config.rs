// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run configuration and the resolution engine
//!
//! One invocation resolves, in a fixed order, which command runs with what
//! options and arguments against which index directory. The order matters:
//! the command name decides the flag grammar, and a single parse pass over
//! the remaining tokens produces the option map and the positionals
//! together. Everything is resolved exactly once, up front, and immutable
//! afterwards; only the index modification time stays lazy, because its
//! absence is an error only for commands that need it.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::{bail, Context, Result};
use once_cell::sync::OnceCell;

use crate::cli;
use crate::commands::{self, Command};
use crate::logging;

/// Relative index location used when `--idx` is not given.
pub const DEFAULT_INDEX_DIR: &str = ".cse.idx";

/// File-size ceiling used when `--max-size` is not given (1 MiB).
pub const DEFAULT_MAX_SIZE: u64 = 1_048_576;

/// Resolved state of one invocation.
#[derive(Debug)]
pub struct RunConfig {
    /// Identifier of the subcommand to run.
    pub command_name: String,
    /// Parsed option flags, global and command-specific merged.
    pub options: BTreeMap<String, String>,
    /// Positional arguments left over after flag parsing.
    pub args: Vec<String>,
    /// Directory holding the on-disk index.
    pub index_dir: PathBuf,
    /// Byte-size ceiling for file-reading operations.
    pub max_size: u64,
    index_mtime: OnceCell<SystemTime>,
}

impl RunConfig {
    /// Resolve the raw argument vector into a configuration and the command
    /// it names.
    pub fn resolve(argv: Vec<String>) -> Result<(Self, Box<dyn Command>)> {
        let mut pending = argv;
        let command_name = resolve_command_name(&mut pending);
        let command = instantiate(&command_name)?;

        let (options, args) = cli::parse_options(command.option_specs(), pending)?;

        let verbosity = options
            .get("verbose")
            .and_then(|count| count.parse::<u8>().ok())
            .unwrap_or(0);
        logging::init(verbosity);

        let index_dir = options
            .get("idx")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_DIR));

        let max_size = options
            .get("max-size")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_MAX_SIZE);

        let config = Self {
            command_name,
            options,
            args,
            index_dir,
            max_size,
            index_mtime: OnceCell::new(),
        };

        Ok((config, command))
    }

    /// Last-modified time of the index directory.
    ///
    /// Stat'd on first access and memoized; a missing directory surfaces
    /// here, not during resolution.
    pub fn index_mod_time(&self) -> Result<SystemTime> {
        self.index_mtime
            .get_or_try_init(|| {
                let meta = fs::metadata(&self.index_dir).with_context(|| {
                    format!(
                        "failed to stat index directory {}",
                        self.index_dir.display()
                    )
                })?;
                meta.modified()
                    .context("filesystem reports no modification time")
            })
            .copied()
    }
}

/// Decide which command the first token names.
///
/// The token is consumed only on a registry hit. A leading flag or an
/// unrecognized word falls back to `search`, leaving every token in place
/// as query input; an empty vector means `help`. Unknown words are never an
/// error, so `cse <query terms>` works without a verb.
fn resolve_command_name(pending: &mut Vec<String>) -> String {
    let Some(first) = pending.first() else {
        return "help".to_string();
    };
    if first.starts_with('-') {
        return "search".to_string();
    }
    if commands::lookup(first).is_some() {
        return pending.remove(0);
    }
    "search".to_string()
}

/// Instantiate the resolved command. A registry miss at this point is a
/// packaging defect, not user input, and aborts the run.
fn instantiate(command_name: &str) -> Result<Box<dyn Command>> {
    match commands::lookup(command_name) {
        Some(factory) => Ok(factory()),
        None => bail!(
            "command implementation `{}` is not registered",
            commands::type_name(command_name)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn empty_vector_resolves_to_help() {
        let (config, _) = RunConfig::resolve(vec![]).unwrap();
        assert_eq!(config.command_name, "help");
        assert!(config.args.is_empty());
    }

    #[test]
    fn leading_flag_resolves_to_search_without_consuming_it() {
        let (config, _) = RunConfig::resolve(argv(&["--idx", "elsewhere", "needle"])).unwrap();
        assert_eq!(config.command_name, "search");
        assert_eq!(config.index_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.args, argv(&["needle"]));
    }

    #[test]
    fn known_first_token_is_consumed_as_the_command() {
        let (config, _) = RunConfig::resolve(argv(&["check"])).unwrap();
        assert_eq!(config.command_name, "check");
        assert!(config.args.is_empty());
    }

    #[test]
    fn unknown_first_token_becomes_a_query_term() {
        let (config, _) = RunConfig::resolve(argv(&["frobnicate", "stuff"])).unwrap();
        assert_eq!(config.command_name, "search");
        assert_eq!(config.args, argv(&["frobnicate", "stuff"]));
    }

    #[test]
    fn options_and_args_partition_the_vector() {
        let (config, _) = RunConfig::resolve(argv(&[
            "search", "--limit", "3", "alpha", "--verbose", "beta",
        ]))
        .unwrap();
        assert_eq!(config.options.get("limit").map(String::as_str), Some("3"));
        assert_eq!(config.options.get("verbose").map(String::as_str), Some("1"));
        assert_eq!(config.args, argv(&["alpha", "beta"]));
    }

    #[test]
    fn defaults_apply_when_flags_are_absent() {
        let (config, _) = RunConfig::resolve(argv(&["check"])).unwrap();
        assert_eq!(config.index_dir, PathBuf::from(DEFAULT_INDEX_DIR));
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
    }

    #[test]
    fn max_size_accepts_positive_overrides_only() {
        let (config, _) = RunConfig::resolve(argv(&["check", "--max-size", "4096"])).unwrap();
        assert_eq!(config.max_size, 4096);

        let (config, _) = RunConfig::resolve(argv(&["check", "--max-size", "0"])).unwrap();
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
    }

    #[test]
    fn mod_time_is_memoized_on_first_access() {
        let dir = TempDir::new().unwrap();
        let idx = dir.path().join("idx");
        fs::create_dir(&idx).unwrap();

        let (config, _) =
            RunConfig::resolve(argv(&["check", "--idx", idx.to_str().unwrap()])).unwrap();
        let first = config.index_mod_time().unwrap();

        // A second read must come from the memo, not a fresh stat.
        fs::remove_dir(&idx).unwrap();
        let second = config.index_mod_time().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_index_dir_fails_only_at_the_point_of_use() {
        let (config, _) = RunConfig::resolve(argv(&["check", "--idx", "no/such/dir"])).unwrap();
        assert!(config.index_mod_time().is_err());
    }

    #[test]
    fn unknown_flag_surfaces_as_a_resolution_error() {
        assert!(RunConfig::resolve(argv(&["check", "--bogus"])).is_err());
    }
}
