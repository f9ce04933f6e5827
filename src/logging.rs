//! Logging setup. Logs go to stderr so they never interleave with the
//! scoreboard on stdout. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(verbose, "Logging initialized");
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,league_live=debug"
    } else {
        "warn,league_live=info"
    }
}
