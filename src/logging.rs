//! Logging setup
//!
//! Structured logs go to stderr through `tracing-subscriber` so command
//! output on stdout stays clean. `DAIRY_LOG` takes precedence over the
//! configured level and accepts any `EnvFilter` directive.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{DairyError, DairyResult};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "DAIRY_LOG";

/// Build the filter from `DAIRY_LOG`, falling back to `default_level`
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber
pub fn init_logging(default_level: &str) -> DairyResult<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(default_level))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| DairyError::Config(format!("Failed to initialize logging: {}", e)))
}
