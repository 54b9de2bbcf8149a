// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flag grammar and option parsing using clap
//!
//! Commands describe their flags as [`OptSpec`]s. [`parse_options`] merges
//! them with the global set and runs a single clap pass that yields the
//! option map and the remaining positional arguments together, so there is
//! no ordering hazard between "parse the flags" and "read the leftovers".

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction};

/// How a flag consumes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptKind {
    /// `--name <VALUE>`
    Value,
    /// Bare flag, repeatable; the option map records the repeat count.
    Count,
}

/// Description of one long option flag.
#[derive(Debug, Clone, Copy)]
pub struct OptSpec {
    pub name: &'static str,
    pub kind: OptKind,
    pub help: &'static str,
}

impl OptSpec {
    pub const fn value(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            kind: OptKind::Value,
            help,
        }
    }

    pub const fn count(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            kind: OptKind::Count,
            help,
        }
    }

    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name).long(self.name).help(self.help);
        match self.kind {
            OptKind::Value => arg.action(ArgAction::Set).value_name("VALUE"),
            OptKind::Count => arg.action(ArgAction::Count),
        }
    }
}

/// Flags every command understands.
pub const GLOBAL_OPTS: &[OptSpec] = &[
    OptSpec::value("idx", "Index directory (default: .cse.idx)"),
    OptSpec::value("dir", "Source directory to index (default: .)"),
    OptSpec::value(
        "max-size",
        "Skip files larger than this many bytes (default: 1048576)",
    ),
    OptSpec::count("verbose", "Raise log verbosity (repeatable)"),
];

/// Parse the pending argument vector against the union of the global flags
/// and `extra`.
///
/// Flag tokens and their values are consumed; every remaining token comes
/// back as a positional argument, in order. Together the two outputs are an
/// exact partition of the input.
pub fn parse_options(
    extra: &[OptSpec],
    pending: Vec<String>,
) -> Result<(BTreeMap<String, String>, Vec<String>)> {
    let mut parser = clap::Command::new("cse")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(Arg::new("args").value_name("ARG").num_args(0..));

    let specs: Vec<OptSpec> = GLOBAL_OPTS.iter().chain(extra).copied().collect();
    for spec in &specs {
        parser = parser.arg(spec.to_arg());
    }

    let matches = parser
        .try_get_matches_from(pending)
        .map_err(|err| anyhow!("{err}"))?;

    let mut options = BTreeMap::new();
    for spec in &specs {
        match spec.kind {
            OptKind::Value => {
                if let Some(value) = matches.get_one::<String>(spec.name) {
                    options.insert(spec.name.to_string(), value.clone());
                }
            }
            OptKind::Count => {
                let count = matches.get_count(spec.name);
                if count > 0 {
                    options.insert(spec.name.to_string(), count.to_string());
                }
            }
        }
    }

    let args = matches
        .get_many::<String>("args")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    Ok((options, args))
}
