//! Logging setup and configuration
//!
//! hubctl reports everything through tracing. The fmt layer writes to
//! stderr so stdout stays unused.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Build the filter: `RUST_LOG` if set, otherwise `default_level`
pub fn build_filter(default_level: &str) -> crate::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| crate::Error::Config(format!("Invalid log filter: {}", e)))
}

/// Setup tracing subscriber for the application
pub fn setup_logging(default_level: &str) -> crate::Result<()> {
    let filter = build_filter(default_level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| crate::Error::Other(format!("Failed to install subscriber: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "hubctl=debug"] {
            assert!(build_filter(level).is_ok(), "{level}");
        }
    }
}
