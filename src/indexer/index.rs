// SPDX-License-Identifier: MIT OR Apache-2.0

//! Index building over the scanned source tree

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tantivy::schema::{Schema, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexWriter};
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::indexer::scanner::FileScanner;

/// Stored field holding the file path, indexed untokenized.
pub const PATH_FIELD: &str = "path";
/// Stored field holding the file contents, tokenized for full-text search.
pub const CONTENT_FIELD: &str = "content";

/// Memory budget for the single writer thread.
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Schema shared by the indexer and the query side.
pub fn build_schema() -> Schema {
    let mut builder = Schema::builder();
    builder.add_text_field(PATH_FIELD, STRING | STORED);
    builder.add_text_field(CONTENT_FIELD, TEXT | STORED);
    builder.build()
}

/// Build (or rebuild) the index for the configured source tree.
///
/// Returns the number of files indexed.
pub fn run(ctx: &RunConfig) -> Result<usize> {
    let root = ctx.options.get("dir").map(String::as_str).unwrap_or(".");

    let mut files = FileScanner::new(root, ctx.max_size).scan()?;
    // The walker returns `./`-prefixed paths when root is `.`; normalize both
    // sides so a custom --idx inside the tree is never indexed into itself.
    let idx = ctx.index_dir.strip_prefix(".").unwrap_or(&ctx.index_dir);
    files.retain(|file| {
        let path = file.path.strip_prefix(".").unwrap_or(&file.path);
        !path.starts_with(idx)
    });
    info!("indexing {} files from {}", files.len(), root);

    let index = create_index(&ctx.index_dir)?;
    let schema = index.schema();
    let path_field = schema.get_field(PATH_FIELD)?;
    let content_field = schema.get_field(CONTENT_FIELD)?;

    let mut writer: IndexWriter = index.writer(WRITER_HEAP_BYTES)?;
    for file in &files {
        debug!("adding {}", file.path.display());
        writer.add_document(doc!(
            path_field => file.path.display().to_string(),
            content_field => file.content.clone()
        ))?;
    }
    writer.commit().context("failed to commit index")?;

    Ok(files.len())
}

/// Create a fresh index directory, replacing an existing index in place.
///
/// A non-empty directory that does not look like an index (no meta.json) is
/// refused rather than wiped.
fn create_index(dir: &Path) -> Result<Index> {
    if dir.exists() {
        if dir.join("meta.json").is_file() {
            fs::remove_dir_all(dir)
                .with_context(|| format!("failed to clear old index at {}", dir.display()))?;
            fs::create_dir_all(dir)?;
        } else if fs::read_dir(dir)?.next().is_some() {
            bail!(
                "{} exists but does not look like an index; refusing to overwrite it",
                dir.display()
            );
        }
    } else {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    Index::create_in_dir(dir, build_schema())
        .with_context(|| format!("failed to create index in {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use tempfile::TempDir;

    fn config_for(root: &Path, idx: &Path, extra: &[&str]) -> RunConfig {
        let mut argv = vec![
            "index".to_string(),
            "--dir".to_string(),
            root.display().to_string(),
            "--idx".to_string(),
            idx.display().to_string(),
        ];
        argv.extend(extra.iter().map(|token| token.to_string()));
        let (config, _) = RunConfig::resolve(argv).unwrap();
        config
    }

    #[test]
    fn indexes_text_files_within_the_size_ceiling() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("keep.rs"), "fn keep() {}").unwrap();
        fs::write(root.join("big.rs"), "x".repeat(4096)).unwrap();
        fs::write(root.join("blob.bin"), [0u8, 0x9f, 0x92, 0x96]).unwrap();

        let idx = dir.path().join("idx");
        let ctx = config_for(&root, &idx, &["--max-size", "1024"]);
        assert_eq!(run(&ctx).unwrap(), 1);
        assert!(idx.join("meta.json").is_file());
    }

    #[test]
    fn rebuild_replaces_an_existing_index() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("one.rs"), "fn one() {}").unwrap();

        let idx = dir.path().join("idx");
        let ctx = config_for(&root, &idx, &[]);
        assert_eq!(run(&ctx).unwrap(), 1);

        fs::write(root.join("two.rs"), "fn two() {}").unwrap();
        assert_eq!(run(&ctx).unwrap(), 2);
    }

    #[test]
    fn refuses_to_overwrite_a_foreign_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("one.rs"), "fn one() {}").unwrap();

        let idx = dir.path().join("data");
        fs::create_dir(&idx).unwrap();
        fs::write(idx.join("precious.txt"), "do not delete").unwrap();

        let ctx = config_for(&root, &idx, &[]);
        assert!(run(&ctx).is_err());
        assert!(idx.join("precious.txt").exists());
    }
}
