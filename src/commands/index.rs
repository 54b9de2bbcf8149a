// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build or rebuild the on-disk index.

use tracing::{error, info};

use crate::commands::Command;
use crate::config::RunConfig;
use crate::indexer;

pub struct Index;

impl Command for Index {
    fn execute(&self, ctx: &RunConfig) -> i32 {
        match indexer::index::run(ctx) {
            Ok(count) => {
                info!("indexed {count} files into {}", ctx.index_dir.display());
                0
            }
            Err(err) => {
                error!("indexing failed: {err:#}");
                1
            }
        }
    }
}
