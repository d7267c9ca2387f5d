// Tracing log adapter - Structured logging using tracing crate

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{GifcutError, GifcutResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Pretty,
    /// JSON format for structured logging
    Json,
}

impl FromStr for LogFormat {
    type Err = GifcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(GifcutError::ConfigError {
                message: format!("Invalid log format: {}. Valid formats: pretty, json", other),
            }),
        }
    }
}

/// Check that `level` is one of trace, debug, info, warn, error
pub fn validate_level(level: &str) -> GifcutResult<()> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(GifcutError::ConfigError {
            message: format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level
            ),
        }),
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level` when set. Logs go to stderr so stdout stays
/// free for command output.
pub fn init_logging(level: &str, format: LogFormat) -> GifcutResult<()> {
    validate_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| GifcutError::LoggingError {
            message: e.to_string(),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| GifcutError::LoggingError {
        message: e.to_string(),
    })
}
