// SPDX-License-Identifier: MIT OR Apache-2.0

//! Full-text search over the on-disk index

use std::ops::Range;

use anyhow::{Context, Result};
use colored::Colorize;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::Value;
use tantivy::snippet::SnippetGenerator;
use tantivy::{Index, TantivyDocument};
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::errors::{IndexNotFoundError, NoResultsError};
use crate::indexer::index::{CONTENT_FIELD, PATH_FIELD};

/// Number of hits printed when `--limit` is not given.
const DEFAULT_LIMIT: usize = 10;

/// Maximum characters in a rendered snippet.
const SNIPPET_MAX_CHARS: usize = 150;

/// Run the query held in the positional arguments and print the hits.
pub fn run(ctx: &RunConfig) -> Result<i32> {
    if ctx.args.is_empty() {
        warn!("no query terms given; try `cse <query words>`");
        return Ok(1);
    }
    if !ctx.index_dir.is_dir() {
        warn!(
            "{}",
            IndexNotFoundError {
                index_path: ctx.index_dir.display().to_string(),
            }
        );
        return Ok(1);
    }

    let index = Index::open_in_dir(&ctx.index_dir).context("failed to open index")?;
    let schema = index.schema();
    let path_field = schema.get_field(PATH_FIELD).context("missing path field")?;
    let content_field = schema
        .get_field(CONTENT_FIELD)
        .context("missing content field")?;

    let reader = index.reader()?;
    let searcher = reader.searcher();

    let query_text = ctx.args.join(" ");
    let mut parser = QueryParser::for_index(&index, vec![content_field, path_field]);
    parser.set_field_boost(path_field, 0.3);
    let (query, _errors) = parser.parse_query_lenient(&query_text);

    let limit = ctx
        .options
        .get("limit")
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_LIMIT);

    let top_docs = searcher.search(&query, &TopDocs::with_limit(limit))?;
    if top_docs.is_empty() {
        warn!("{}", NoResultsError { query: query_text });
        return Ok(1);
    }

    let mut snippets = SnippetGenerator::create(&searcher, &*query, content_field)?;
    snippets.set_max_num_chars(SNIPPET_MAX_CHARS);

    info!("{} hits for '{}'", top_docs.len(), query_text);
    for (score, address) in top_docs {
        let doc: TantivyDocument = searcher.doc(address)?;
        let path = doc
            .get_first(path_field)
            .and_then(|value| value.as_str())
            .unwrap_or("<unknown>");
        println!("{} {}", path.green().bold(), format!("({score:.2})").dimmed());

        let snippet = snippets.snippet_from_doc(&doc);
        let rendered = render_snippet(snippet.fragment(), snippet.highlighted());
        if !rendered.is_empty() {
            println!("  {rendered}");
        }
    }

    Ok(0)
}

/// Flatten a snippet fragment to one line, styling the matched ranges.
fn render_snippet(fragment: &str, highlighted: &[Range<usize>]) -> String {
    let mut out = String::new();
    let mut cursor = 0;
    for range in highlighted {
        if range.start > cursor {
            out.push_str(&fragment[cursor..range.start]);
        }
        out.push_str(&fragment[range.clone()].red().bold().to_string());
        cursor = range.end;
    }
    out.push_str(&fragment[cursor..]);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
