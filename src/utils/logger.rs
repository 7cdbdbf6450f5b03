use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level names accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Filter directive for this crate's events at `level`. Other crates stay at
/// `warn` unless `RUST_LOG` says otherwise.
pub fn filter_directive(level: &str) -> String {
    format!("warn,guitar_analyzer={}", level)
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(level)))
}

/// Compact human-readable output for terminal runs.
pub fn init_cli_logger(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

/// JSON log lines, selected with `logging.format = "json"` in the TOML config.
pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .json()
                .with_current_span(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_parses_for_every_level() {
        for level in LOG_LEVELS {
            let directive = filter_directive(level);
            assert!(directive.ends_with(&format!("guitar_analyzer={}", level)));
            assert!(EnvFilter::try_new(&directive).is_ok());
        }
    }
}
