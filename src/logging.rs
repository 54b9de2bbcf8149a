// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide logging setup
//!
//! Initialized once per process from the resolved `--verbose` count. The
//! quiet profile keeps other crates at warn and drops timestamps; the
//! verbose profile shows debug output with timing. `RUST_LOG` overrides
//! either profile.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install the global tracing subscriber. Safe to call more than once; only
/// the first call takes effect.
pub fn init(verbosity: u8) {
    INITIALIZED.get_or_init(|| {
        let profile = if verbosity > 0 {
            "info,cse=debug"
        } else {
            "warn,cse=info"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let _ = if verbosity > 0 {
            builder.try_init()
        } else {
            builder.without_time().with_level(false).try_init()
        };
    });
}
