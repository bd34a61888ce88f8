//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "rex=info";

/// Initialize the REX tracing/logging system.
///
/// Reads the `REX_LOG` environment variable for per-subsystem log levels.
/// Format: `REX_LOG=rex_scoring::reputation=debug,rex_scoring::pipeline=info`
///
/// Falls back to `rex=info` if `REX_LOG` is not set or is invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    });
}

/// Initialize tracing with JSON-formatted log lines on stderr.
///
/// Shares the `Once` guard with [`init_tracing`], so whichever runs first wins.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
