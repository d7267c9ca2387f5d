// TOML config adapter - Configuration loaded from TOML files and the environment

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapters::tracing_log::{validate_level, LogFormat};
use crate::app::clip_converter::ConverterSettings;
use crate::domain::model::*;
use crate::error::{GifcutError, GifcutResult};

/// Prefix of environment variables that override configuration keys
pub const ENV_PREFIX: &str = "GIFCUT_";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    pub engine_load_timeout_secs: u64,
    pub normalize_presets: bool,
    pub field_policy: FieldPolicy,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub log_format: LogFormat,
    // Kept last so it serializes after the plain keys
    pub presets: Vec<Preset>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            poll_interval_ms: 100,
            max_poll_attempts: 600,
            engine_load_timeout_secs: 30,
            normalize_presets: true,
            field_policy: FieldPolicy::Accept,
            output_dir: PathBuf::from("."),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            presets: Preset::defaults(),
        }
    }
}

/// On-disk layout: every key lives under a `[gifcut]` table
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    gifcut: AppConfig,
}

fn config_error(message: String) -> GifcutError {
    GifcutError::ConfigError { message }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> GifcutResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| config_error(format!("Invalid value for {}: {}", key, value)))
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> GifcutResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.gifcut)
    }

    /// Load configuration from a TOML file
    pub fn load_file(path: &Path) -> GifcutResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to the on-disk TOML layout
    pub fn to_toml_string(&self) -> GifcutResult<String> {
        #[derive(Serialize)]
        struct Wrapper<'a> {
            gifcut: &'a AppConfig,
        }
        toml::to_string_pretty(&Wrapper { gifcut: self })
            .map_err(|e| config_error(format!("Failed to serialize config: {}", e)))
    }

    /// Apply `GIFCUT_*` overrides; returns how many were applied
    pub fn apply_env<I>(&mut self, vars: I) -> GifcutResult<usize>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut applied = 0;
        for (name, value) in vars {
            let Some(key) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match key {
                "FFMPEG_PATH" => self.ffmpeg_path = PathBuf::from(&value),
                "FFPROBE_PATH" => self.ffprobe_path = PathBuf::from(&value),
                "POLL_INTERVAL_MS" => self.poll_interval_ms = parse_env(&name, &value)?,
                "MAX_POLL_ATTEMPTS" => self.max_poll_attempts = parse_env(&name, &value)?,
                "ENGINE_LOAD_TIMEOUT_SECS" => {
                    self.engine_load_timeout_secs = parse_env(&name, &value)?
                }
                "NORMALIZE_PRESETS" => self.normalize_presets = parse_env(&name, &value)?,
                "FIELD_POLICY" => self.field_policy = parse_env(&name, &value)?,
                "OUTPUT_DIR" => self.output_dir = PathBuf::from(&value),
                "LOG_LEVEL" => self.log_level = value.clone(),
                "LOG_FORMAT" => self.log_format = parse_env(&name, &value)?,
                _ => {
                    debug!(variable = %name, "Ignoring unknown environment override");
                    continue;
                }
            }
            applied += 1;
        }
        Ok(applied)
    }

    /// Validate configuration
    pub fn validate(&self) -> GifcutResult<()> {
        validate_level(&self.log_level)?;

        if self.poll_interval_ms == 0 {
            return Err(config_error("poll_interval_ms must be positive".to_string()));
        }
        if self.max_poll_attempts == 0 {
            return Err(config_error("max_poll_attempts must be positive".to_string()));
        }
        if self.engine_load_timeout_secs == 0 {
            return Err(config_error(
                "engine_load_timeout_secs must be positive".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for preset in &self.presets {
            Preset::new(preset.label.clone(), preset.duration_secs)?;
            if !seen.insert(preset.label.to_lowercase()) {
                return Err(config_error(format!("Duplicate preset label: {}", preset.label)));
            }
        }

        Ok(())
    }

    /// Longest time duration discovery may take
    pub fn duration_discovery_timeout(&self) -> Duration {
        self.poll_interval()
            .checked_mul(self.max_poll_attempts)
            .and_then(|total| total.checked_add(Duration::from_secs(1)))
            .unwrap_or(Duration::MAX)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn engine_load_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_load_timeout_secs)
    }

    /// Settings handed to each converter
    pub fn converter_settings(&self) -> ConverterSettings {
        ConverterSettings {
            presets: self.presets.clone(),
            normalize_presets: self.normalize_presets,
            field_policy: self.field_policy,
            poll_interval: self.poll_interval(),
            max_poll_attempts: self.max_poll_attempts,
        }
    }
}
