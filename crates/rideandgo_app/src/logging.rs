//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Filter from `RUST_LOG` when it is set and valid, else from the configured level
fn filter_for(configured: &str, env: Option<&str>) -> EnvFilter {
    if let Some(directives) = env.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(err) => eprintln!("ignoring invalid RUST_LOG `{directives}`: {err}"),
        }
    }
    EnvFilter::try_new(configured).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, writing to stderr.
///
/// Returns false when a subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(&config.level, env.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn configured_level_applies_without_env() {
        assert_eq!(filter_for("debug", None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter_for("warn", Some("  ")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn env_overrides_configured_level() {
        let filter = filter_for("info", Some("rideandgo_core=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}
