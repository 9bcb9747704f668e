//! Tracing setup driven by the `logging` config section.
//!
//! `RUST_LOG` still wins over the configured filter so an operator can turn up
//! verbosity on a running deployment without editing config files.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Directives applied when neither `RUST_LOG` nor the config provides usable ones.
pub const DEFAULT_FILTER: &str = "incident_registry=info,tower_http=info";

/// Install the global subscriber.
pub fn init(config: &LoggingConfig) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), &config.filter);
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty().with_target(true)).init(),
    }
}

/// Pick the first parseable directive set: `RUST_LOG`, then the configured
/// filter, then [`DEFAULT_FILTER`].
fn build_filter(rust_log: Option<&str>, configured: &str) -> EnvFilter {
    rust_log
        .into_iter()
        .chain([configured])
        .find_map(|directives| match EnvFilter::try_new(directives) {
            Ok(filter) => Some(filter),
            Err(e) => {
                eprintln!("Ignoring invalid log filter {directives:?}: {e}");
                None
            }
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing for tests (human-readable format, no JSON).
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("incident_registry=debug")
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_filter_used_without_rust_log() {
        let filter = build_filter(None, "incident_registry=debug");
        assert_eq!(filter.to_string(), "incident_registry=debug");
    }

    #[test]
    fn test_rust_log_overrides_configured_filter() {
        let filter = build_filter(Some("warn"), "incident_registry=debug");
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_invalid_filters_fall_through() {
        let filter = build_filter(Some("incident_registry=loud"), "incident_registry=trace");
        assert_eq!(filter.to_string(), "incident_registry=trace");

        let filter = build_filter(None, "incident_registry=loud");
        let rendered = filter.to_string();
        assert!(rendered.contains("incident_registry=info"));
        assert!(rendered.contains("tower_http=info"));
    }
}
