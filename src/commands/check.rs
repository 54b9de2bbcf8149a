// SPDX-License-Identifier: MIT OR Apache-2.0

//! Index health prober
//!
//! Opens an existing index, forces its reader and schema eagerly, and
//! reports the schema shape and document count. Every failure is handled
//! here; the exit status is the only signal that leaves the command, which
//! makes it safe to run speculatively against a corrupted index.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use colored::Colorize;
use tantivy::collector::Count;
use tantivy::query::AllQuery;
use tantivy::schema::{FieldEntry, FieldType};
use tantivy::Index;
use tracing::{debug, error, info, warn};

use crate::commands::Command;
use crate::config::RunConfig;

/// Health summary of a structurally valid index.
#[derive(Debug)]
pub struct IndexHealthReport {
    /// Field names with simplified type labels, lexicographically sorted.
    pub fields: Vec<(String, String)>,
    /// Total number of indexed documents.
    pub doc_count: usize,
}

impl IndexHealthReport {
    /// One-line rendering of the field list, e.g.
    /// `content (TextType), path (StringType)`.
    pub fn field_summary(&self) -> String {
        self.fields
            .iter()
            .map(|(name, label)| format!("{name} ({label})"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub struct Check;

impl Command for Check {
    fn execute(&self, ctx: &RunConfig) -> i32 {
        let dir = &ctx.index_dir;
        if !dir.is_dir() {
            warn!(
                "no index at {}; run `cse index` to build one first",
                dir.display()
            );
            return 1;
        }

        let report = match probe(dir) {
            Ok(report) => report,
            Err(err) => {
                error!(
                    "{}",
                    format!("{} is not a valid index", dir.display()).red().bold()
                );
                debug!("probe failure: {err:#}");
                return 1;
            }
        };

        info!("index at {} is healthy", dir.display());
        for (name, label) in &report.fields {
            info!("  {name} ({label})");
        }
        info!("{} documents indexed", report.doc_count);
        match ctx.index_mod_time() {
            Ok(mtime) => {
                let stamp: DateTime<Local> = mtime.into();
                info!("last modified {}", stamp.format("%Y-%m-%d %H:%M:%S"));
            }
            Err(err) => debug!("could not stat index directory: {err:#}"),
        }

        0
    }
}

/// Open the index and eagerly force its reader and schema.
///
/// Counting through a real collector touches the segment files, so a
/// partially written or corrupt index fails here rather than on the first
/// query someone runs against it.
pub fn probe(dir: &Path) -> Result<IndexHealthReport> {
    let index =
        Index::open_in_dir(dir).with_context(|| format!("failed to open {}", dir.display()))?;
    let reader = index.reader().context("failed to build index reader")?;
    let searcher = reader.searcher();
    let schema = index.schema();

    let mut fields: Vec<(String, String)> = schema
        .fields()
        .map(|(_, entry)| (entry.name().to_string(), type_label(entry).to_string()))
        .collect();
    fields.sort();

    let doc_count = searcher
        .search(&AllQuery, &Count)
        .context("failed to count documents")?;

    Ok(IndexHealthReport { fields, doc_count })
}

/// Simplified type label for a schema field: the engine's type name without
/// its namespace, with tokenized and raw string fields told apart.
fn type_label(entry: &FieldEntry) -> &'static str {
    match entry.field_type() {
        FieldType::Str(options) => {
            let raw = options
                .get_indexing_options()
                .map(|indexing| indexing.tokenizer() == "raw")
                .unwrap_or(true);
            if raw {
                "StringType"
            } else {
                "TextType"
            }
        }
        FieldType::U64(_) => "U64Type",
        FieldType::I64(_) => "I64Type",
        FieldType::F64(_) => "F64Type",
        FieldType::Bool(_) => "BoolType",
        FieldType::Date(_) => "DateType",
        FieldType::Facet(_) => "FacetType",
        FieldType::Bytes(_) => "BytesType",
        FieldType::JsonObject(_) => "JsonType",
        FieldType::IpAddr(_) => "IpAddrType",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tantivy::doc;
    use tempfile::TempDir;

    fn config_for(idx: &Path) -> RunConfig {
        let (config, _) = RunConfig::resolve(vec![
            "check".to_string(),
            "--idx".to_string(),
            idx.display().to_string(),
        ])
        .unwrap();
        config
    }

    fn build_index(dir: &Path, docs: usize) {
        fs::create_dir_all(dir).unwrap();
        let index = Index::create_in_dir(dir, crate::indexer::index::build_schema()).unwrap();
        let schema = index.schema();
        let path = schema.get_field("path").unwrap();
        let content = schema.get_field("content").unwrap();
        let mut writer: tantivy::IndexWriter = index.writer(50_000_000).unwrap();
        for n in 0..docs {
            writer
                .add_document(doc!(
                    path => format!("file{n}.rs"),
                    content => format!("fn f{n}() {{}}")
                ))
                .unwrap();
        }
        writer.commit().unwrap();
    }

    #[test]
    fn missing_directory_reports_unhealthy_without_probing() {
        let dir = TempDir::new().unwrap();
        let ctx = config_for(&dir.path().join("absent"));
        assert_eq!(Check.execute(&ctx), 1);
    }

    #[test]
    fn directory_without_a_valid_index_reports_unhealthy() {
        let dir = TempDir::new().unwrap();
        let idx = dir.path().join("idx");
        fs::create_dir(&idx).unwrap();
        fs::write(idx.join("meta.json"), "not json at all").unwrap();
        assert_eq!(Check.execute(&config_for(&idx)), 1);
    }

    #[test]
    fn healthy_index_reports_sorted_fields_and_count() {
        let dir = TempDir::new().unwrap();
        let idx = dir.path().join("idx");
        build_index(&idx, 42);

        let report = probe(&idx).unwrap();
        assert_eq!(report.doc_count, 42);
        assert_eq!(
            report.field_summary(),
            "content (TextType), path (StringType)"
        );
        assert_eq!(Check.execute(&config_for(&idx)), 0);
    }
}
