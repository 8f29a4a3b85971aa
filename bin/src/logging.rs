//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crate targets that log at the chosen level; everything else stays at warn.
const TARGETS: [&str; 4] = ["tickbars", "tickbars_fetch", "tickbars_plot", "tickbars_format"];

/// Builds the default filter directive for the given verbosity.
fn default_directive(verbose: u8) -> String {
    let level = if verbose > 0 { "debug" } else { "info" };
    let mut directive = String::from("warn");
    for target in TARGETS {
        directive.push_str(&format!(",{target}={level}"));
    }
    directive
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity flag.
pub(crate) fn init_logger(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
