//! Logging infrastructure for the modscope CLI.
//!
//! Structured logging via the `tracing` ecosystem: `--verbose` for debug,
//! `--quiet` for errors only, `RUST_LOG` for custom filters.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber. Call once, before any logging.
///
/// Level resolution order: `--verbose`, `--quiet`, `RUST_LOG`, then an
/// info-level default scoped to the modscope crates.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("modscope_cli=debug,modscope_compiler=debug,modscope_sandbox=debug,modscope_analyzer=debug")
    } else if quiet {
        EnvFilter::new("modscope_cli=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("modscope_cli=info,modscope_compiler=info,modscope_sandbox=info")
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
