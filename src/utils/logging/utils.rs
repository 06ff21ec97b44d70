use super::types::{LogFormat, LogLevel};
use crate::config::LoggingConfig;
use crate::utils::error::{Result, ValidatorError};
use std::env;
use tracing_subscriber::EnvFilter;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Build the filter: `RUST_LOG` wins over the configured level.
    pub fn env_filter(level: LogLevel) -> EnvFilter {
        match env::var("RUST_LOG") {
            Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
            _ => EnvFilter::new(level.as_directive()),
        }
    }

    /// Install the global subscriber. Fails if one is already installed.
    pub fn init_logger(config: &LoggingConfig) -> Result<()> {
        let filter = Self::env_filter(config.level);
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .with_thread_ids(false)
            .with_writer(std::io::stderr);

        let installed = match config.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Text => builder.try_init(),
        };

        installed.map_err(|e| ValidatorError::config(format!("Failed to initialize logging: {}", e)))
    }

    pub fn format_duration(duration: std::time::Duration) -> String {
        let total_ms = duration.as_millis();

        if total_ms < 1000 {
            format!("{}ms", total_ms)
        } else if total_ms < 60_000 {
            format!("{:.2}s", duration.as_secs_f64())
        } else {
            let minutes = total_ms / 60_000;
            let seconds = (total_ms % 60_000) as f64 / 1000.0;
            format!("{}m {:.1}s", minutes, seconds)
        }
    }
}
