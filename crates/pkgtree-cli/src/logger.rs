//! Logging setup for the CLI, built on the `tracing` ecosystem.
//!
//! Verbosity is driven by `--verbose`/`--quiet`, with `RUST_LOG` honored when
//! neither flag is given. Colors follow `--no-color` and the `NO_COLOR`
//! convention.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber. Call once, before any logging occurs.
///
/// Level resolution order: `--verbose` (debug for pkgtree crates), `--quiet`
/// (errors only), `RUST_LOG`, then a warn-level default. The payload is the
/// graph on stdout; routine progress is opt-in. All diagnostics go to stderr.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("pkgtree=debug,pkgtree_graph=debug,pkgtree_cli=debug")
    } else if quiet {
        EnvFilter::new("pkgtree=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pkgtree=warn,pkgtree_graph=warn,pkgtree_cli=warn"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Check whether colored output should be enabled for stderr.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, then falls back to terminal
/// detection.
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
