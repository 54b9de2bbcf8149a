// SPDX-License-Identifier: MIT OR Apache-2.0

//! Usage screen assembled from the dispatch registry.

use crate::cli::{OptKind, GLOBAL_OPTS};
use crate::commands::{Command, REGISTRY};
use crate::config::{RunConfig, DEFAULT_INDEX_DIR};

pub struct Help;

impl Command for Help {
    fn execute(&self, _ctx: &RunConfig) -> i32 {
        println!("cse - local full-text code search");
        println!();
        println!("Usage: cse [COMMAND] [OPTIONS] [ARGS]...");
        println!("       cse <query terms>          (search is the default command)");
        println!();
        println!("Commands:");
        for (name, summary, _) in REGISTRY {
            println!("  {name:<8} {summary}");
        }
        println!();
        println!("Global options:");
        for spec in GLOBAL_OPTS {
            let flag = match spec.kind {
                OptKind::Value => format!("--{} <VALUE>", spec.name),
                OptKind::Count => format!("--{}", spec.name),
            };
            println!("  {flag:<21} {}", spec.help);
        }
        println!();
        println!("The index lives in {DEFAULT_INDEX_DIR} unless --idx points elsewhere.");
        0
    }
}
