// SPDX-License-Identifier: MIT OR Apache-2.0

//! File scanner using the ignore crate (same as ripgrep)

use std::path::{Path, PathBuf};

use anyhow::Result;
use ignore::WalkBuilder;
use tracing::debug;

use crate::config::DEFAULT_INDEX_DIR;

/// Scanned file with content
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub content: String,
}

/// File scanner that respects .gitignore and skips VCS and index internals
pub struct FileScanner {
    root: PathBuf,
    max_size: u64,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>, max_size: u64) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_size,
        }
    }

    /// Scan all files under the root.
    ///
    /// Files above the size ceiling and files that are not valid UTF-8 text
    /// are skipped, not errors.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .filter_entry(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| {
                        name != DEFAULT_INDEX_DIR
                            && name != ".git"
                            && name != ".hg"
                            && name != ".svn"
                    })
                    .unwrap_or(true)
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                continue;
            }

            let path = entry.path();
            match entry.metadata() {
                Ok(meta) if meta.len() > self.max_size => {
                    debug!(
                        "skipping {} ({} bytes over the {} limit)",
                        path.display(),
                        meta.len(),
                        self.max_size
                    );
                    continue;
                }
                Err(err) => {
                    debug!("skipping {}: {err}", path.display());
                    continue;
                }
                Ok(_) => {}
            }

            match std::fs::read_to_string(path) {
                Ok(content) => files.push(ScannedFile {
                    path: path.to_path_buf(),
                    content,
                }),
                Err(err) => debug!("skipping {} (not UTF-8 text): {err}", path.display()),
            }
        }

        Ok(files)
    }
}
