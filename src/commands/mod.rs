// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command contract and dispatch registry
//!
//! Every subcommand implements [`Command`]; the registry maps its
//! lower-case token to a constructor. Tokens map to implementation type
//! names by camel-casing (`check` -> `Check`), which only surfaces in the
//! packaging-defect diagnostic when a resolved name has no constructor.

pub mod check;
pub mod help;
pub mod index;
pub mod search;

use crate::cli::OptSpec;
use crate::config::RunConfig;

/// Capability set every subcommand satisfies.
pub trait Command {
    /// Command-specific flags, merged with the global set before parsing.
    fn option_specs(&self) -> &'static [OptSpec] {
        &[]
    }

    /// Run against the resolved configuration; the return value becomes the
    /// process exit status.
    fn execute(&self, ctx: &RunConfig) -> i32;
}

type Factory = fn() -> Box<dyn Command>;

/// Registered commands: token, one-line summary, constructor.
pub const REGISTRY: &[(&str, &str, Factory)] = &[
    (
        "check",
        "Validate an existing index and report its shape",
        || Box::new(check::Check),
    ),
    ("help", "Show usage and the command list", || {
        Box::new(help::Help)
    }),
    ("index", "Build the index from a source tree", || {
        Box::new(index::Index)
    }),
    ("search", "Query the index (default command)", || {
        Box::new(search::Search)
    }),
];

/// Look up a command constructor by its token.
pub fn lookup(token: &str) -> Option<Factory> {
    REGISTRY
        .iter()
        .find(|(name, _, _)| *name == token)
        .map(|(_, _, factory)| *factory)
}

/// Camel-case a command token into its implementation type name.
pub fn type_name(token: &str) -> String {
    token
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
