//! cse - Local full-text code search
//!
//! Build a tantivy index of a source tree, query it, and check its health.
//! The first word of the invocation picks the command; anything that is not
//! a known command is treated as a search query.

use std::process::ExitCode;

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    match cse::run(argv) {
        Ok(status) => ExitCode::from(status as u8),
        Err(err) => {
            eprintln!("cse: {err:#}");
            ExitCode::FAILURE
        }
    }
}
