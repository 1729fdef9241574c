//! Tracing subscriber setup for the `skycast` binary

use crate::config::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for a `-v` count; `None` keeps the configured level
#[must_use]
pub fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over everything, then the verbosity flag, then the
/// configured level. Output goes to stderr so rendered dashboards on stdout
/// stay clean.
pub fn init(config: &LoggingConfig, verbose: u8) {
    let level = verbosity_level(verbose).unwrap_or(config.level.as_str());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("skycast={level},warn")));

    let registry = tracing_subscriber::registry().with(filter);

    // try_init fails when a global subscriber is already set
    let result = if config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already installed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_level() {
        assert_eq!(verbosity_level(0), None);
        assert_eq!(verbosity_level(1), Some("debug"));
        assert_eq!(verbosity_level(4), Some("trace"));
    }
}
