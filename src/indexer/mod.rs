// SPDX-License-Identifier: MIT OR Apache-2.0

//! Indexer module - file scanning and index building

pub mod index;
pub mod scanner;

pub use scanner::FileScanner;
