//! Tracing bootstrap
//!
//! Installs the process-wide `tracing` subscriber: an [`EnvFilter`] (the
//! `RUST_LOG` environment variable wins over the supplied defaults) and a
//! fmt layer. Library crates only emit events; binaries and test harnesses
//! call [`init_tracing`] once at startup.

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INSTALLED: OnceCell<()> = OnceCell::new();

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid filter directives `{directives}`: {reason}")]
    InvalidDirectives { directives: String, reason: String },

    #[error("Another global subscriber is already installed: {0}")]
    SubscriberInstalled(String),
}

/// Install the global subscriber. Repeated calls are no-ops.
///
/// `default_directives` is used when `RUST_LOG` is unset or unparsable,
/// e.g. `"blog=info,platform=info,kernel=info"`.
pub fn init_tracing(default_directives: &str) -> Result<(), TelemetryError> {
    INSTALLED
        .get_or_try_init(|| {
            let filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_directives))
                .map_err(|e| TelemetryError::InvalidDirectives {
                    directives: default_directives.to_string(),
                    reason: e.to_string(),
                })?;

            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()
                .map_err(|e| TelemetryError::SubscriberInstalled(e.to_string()))?;

            tracing::debug!(directives = default_directives, "Tracing initialized");
            Ok(())
        })
        .map(|_| ())
}

/// Default directives for the workspace crates
pub fn default_directives() -> &'static str {
    if cfg!(debug_assertions) {
        "blog=debug,platform=debug,kernel=debug"
    } else {
        "blog=info,platform=info,kernel=info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(default_directives()).unwrap();
        init_tracing("ignored=trace").unwrap();
        assert!(INSTALLED.get().is_some());
    }
}
