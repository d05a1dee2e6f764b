//! Logging and tracing configuration
//!
//! Diagnostics go through tracing to stderr. Report output (attachments,
//! pass/fail lines) is printed to stdout by the runner and is not affected
//! by the filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for the CLI
///
/// Logs are controlled by the `RUST_LOG` environment variable.
/// Default level is INFO for this crate, WARN for dependencies.
pub fn init_cli() {
    init_with_default("posts_api=info,warn");
}

/// Initialize tracing with more detail, used by `--verbose`
pub fn init_verbose() {
    init_with_default("posts_api=debug,info");
}

fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
