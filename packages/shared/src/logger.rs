//! Logging setup utilities for the LAN chat application.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive, e.g. `lanchat_server=debug,tower_http=debug`.
fn default_directives(targets: &[&str], default_log_level: &str) -> String {
    targets
        .iter()
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// Every crate listed in `targets` logs at `default_log_level`.
/// The filter can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `targets` - Crate names to enable (e.g. `["lanchat-server", "tower_http"]`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use lanchat_shared::logger::setup_logger;
///
/// setup_logger(&["lanchat-server", "lanchat-shared"], "debug");
/// ```
pub fn setup_logger(targets: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(targets, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Logger initialized for {:?}", targets);
}
