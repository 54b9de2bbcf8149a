//! Error types with helpful suggestions
//!
//! Provides user-friendly error messages with actionable suggestions.

use std::fmt;

/// Error indicating the search index was not found
#[derive(Debug)]
pub struct IndexNotFoundError {
    pub index_path: String,
}

impl fmt::Display for IndexNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Index not found at '{}'\n\n\
             Suggestion: Run 'cse index' to build the search index first.\n\
             Example: cse index\n\
             Or from a specific source tree: cse index --dir /path/to/project",
            self.index_path
        )
    }
}

impl std::error::Error for IndexNotFoundError {}

/// Error indicating no search results were found
#[derive(Debug)]
pub struct NoResultsError {
    pub query: String,
}

impl fmt::Display for NoResultsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No results found for query: '{}'\n\n\
             Suggestions:\n\
             - Try a different or broader search query\n\
             - Rebuild the index if the tree changed: cse index",
            self.query
        )
    }
}

impl std::error::Error for NoResultsError {}
