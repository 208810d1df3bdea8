//! Logging configuration using tracing
//!
//! Output goes to stderr so stdout stays free for rendered views. The filter
//! is read from `SHOWCASE_LOG` and falls back to `info` for the showcase
//! crates (`debug` when verbose).
//!
//! # Examples
//! ```bash
//! SHOWCASE_LOG=debug showcase
//! SHOWCASE_LOG=showcase_core::rules=trace showcase
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "SHOWCASE_LOG";

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "showcase=debug,showcase_core=debug,showcase_cli=debug,showcase_ffi=debug,warn"
    } else {
        "showcase=info,showcase_core=info,showcase_cli=info,showcase_ffi=info,warn"
    }
}

/// Install the global subscriber. Returns `false` if one was already set,
/// which happens when a host initializes logging twice.
pub fn init(verbose: bool) -> bool {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .is_ok()
}
