//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use crate::adapters::AppConfig;
use crate::cli::{Cli, Commands};
use crate::error::{GifcutError, GifcutResult};

/// Files searched when no `--config` is given, first match wins
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["gifcut.toml", "config/gifcut.toml"];

/// Resolved configuration plus a record of where each layer came from.
///
/// The notes are logged by the caller once the subscriber is installed.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub config: AppConfig,
    pub notes: Vec<String>,
}

/// Build configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> GifcutResult<ResolvedConfig> {
    initialize_with_env(cli, std::env::vars())
}

/// Same as [`initialize_configuration_hierarchy`] with an explicit environment
pub fn initialize_with_env<I>(cli: &Cli, env: I) -> GifcutResult<ResolvedConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut notes = Vec::new();

    // Step 1: defaults, replaced wholesale by a config file when one exists
    let mut config = match locate_config_file(cli.config.as_deref())? {
        Some(path) => {
            notes.push(format!("Loaded configuration from {}", path.display()));
            AppConfig::load_file(&path)?
        }
        None => {
            notes.push("No configuration file found, using defaults".to_string());
            AppConfig::default()
        }
    };

    // Step 2: environment overrides
    let env_overrides = config.apply_env(env)?;
    if env_overrides > 0 {
        notes.push(format!("Applied {} environment overrides", env_overrides));
    }

    // Step 3: CLI overrides
    let cli_overrides = apply_cli_overrides(&mut config, cli);
    if cli_overrides > 0 {
        notes.push(format!("Applied {} CLI overrides", cli_overrides));
    }

    config.validate()?;
    Ok(ResolvedConfig { config, notes })
}

fn locate_config_file(explicit: Option<&Path>) -> GifcutResult<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(GifcutError::ConfigError {
                message: format!("Config file does not exist: {}", path.display()),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    Ok(DEFAULT_CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists()))
}

fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut applied = 0;

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
        applied += 1;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
        applied += 1;
    }
    if let Commands::Convert(args) = &cli.command {
        if let Some(ffmpeg) = &args.ffmpeg {
            config.ffmpeg_path = ffmpeg.clone();
            applied += 1;
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LogFormat;
    use clap::Parser;
    use tempfile::TempDir;

    fn no_env() -> Vec<(String, String)> {
        Vec::new()
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gifcut.toml");
        std::fs::write(
            &path,
            "[gifcut]\nlog_level = \"warn\"\npoll_interval_ms = 50\nffmpeg_path = \"/file/ffmpeg\"\n",
        )
        .unwrap();

        let cli = Cli::parse_from([
            "gifcut",
            "--config",
            path.to_str().unwrap(),
            "--log-level",
            "debug",
            "convert",
            "--input",
            "in.mp4",
            "--ffmpeg",
            "/cli/ffmpeg",
        ]);
        let env = vec![
            ("GIFCUT_LOG_LEVEL".to_string(), "error".to_string()),
            ("GIFCUT_POLL_INTERVAL_MS".to_string(), "75".to_string()),
        ];

        let resolved = initialize_with_env(&cli, env).unwrap();
        assert_eq!(resolved.config.log_level, "debug");
        assert_eq!(resolved.config.poll_interval_ms, 75);
        assert_eq!(resolved.config.ffmpeg_path, PathBuf::from("/cli/ffmpeg"));
        assert_eq!(resolved.notes.len(), 3);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let cli = Cli::parse_from(["gifcut", "--config", "/nonexistent/gifcut.toml", "presets"]);
        assert!(matches!(
            initialize_with_env(&cli, no_env()),
            Err(GifcutError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let cli = Cli::parse_from(["gifcut", "--log-level", "shouty", "presets"]);
        assert!(initialize_with_env(&cli, no_env()).is_err());
    }

    #[test]
    fn test_log_format_override() {
        let cli = Cli::parse_from(["gifcut", "--log-format", "json", "presets"]);
        let resolved = initialize_with_env(&cli, no_env()).unwrap();
        assert_eq!(resolved.config.log_format, LogFormat::Json);
    }
}
