// SPDX-License-Identifier: MIT OR Apache-2.0

//! The default command: query the index.

use tracing::error;

use crate::cli::OptSpec;
use crate::commands::Command;
use crate::config::RunConfig;
use crate::query;

const OPTS: &[OptSpec] = &[OptSpec::value(
    "limit",
    "Maximum number of hits to print (default: 10)",
)];

pub struct Search;

impl Command for Search {
    fn option_specs(&self) -> &'static [OptSpec] {
        OPTS
    }

    fn execute(&self, ctx: &RunConfig) -> i32 {
        match query::search::run(ctx) {
            Ok(status) => status,
            Err(err) => {
                error!("search failed: {err:#}");
                1
            }
        }
    }
}
