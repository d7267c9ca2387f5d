// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Point on a media timeline split into hour, minute and second fields.
///
/// Field bounds (0-23, 0-59) are display hints only; a `TimeSpec` may hold
/// larger values and `total_seconds` still adds them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSpec {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeSpec {
    /// Create a new TimeSpec from its fields
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// The start of the timeline
    pub fn zero() -> Self {
        Self::default()
    }

    /// Total number of seconds represented by all three fields
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    /// Build a normalized TimeSpec (minutes and seconds below 60)
    pub fn from_total_seconds(total: u64) -> Self {
        let hours = u32::try_from(total / 3600).unwrap_or(u32::MAX);
        Self {
            hours,
            minutes: ((total % 3600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    /// Build a TimeSpec that keeps the whole value in the seconds field
    pub fn from_raw_seconds(seconds: u32) -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds,
        }
    }

    /// Parse a strict colon-delimited `HH:MM:SS` string
    pub fn parse_hms(text: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = text.trim().split(':').collect();
        if parts.len() != 3 {
            return Err(DomainError::MalformedDurationFormat(text.to_string()));
        }

        let mut fields = [0u32; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse::<u32>()
                .map_err(|_| DomainError::MalformedDurationFormat(text.to_string()))?;
        }

        Ok(Self::new(fields[0], fields[1], fields[2]))
    }

    /// Parse user input: `HH:MM:SS`, `MM:SS` or plain seconds
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let trimmed = text.trim();
        let invalid = || {
            DomainError::BadArgs(format!(
                "Invalid time '{}'. Supported formats: HH:MM:SS, MM:SS or seconds",
                trimmed
            ))
        };

        let parts = trimmed
            .split(':')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match parts.as_slice() {
            [seconds] => Ok(Self::from_total_seconds(u64::from(*seconds))),
            [minutes, seconds] => Ok(Self::new(0, *minutes, *seconds)),
            [hours, minutes, seconds] => Ok(Self::new(*hours, *minutes, *seconds)),
            _ => Err(invalid()),
        }
    }

    /// Read a single field
    pub fn get(&self, field: TimeField) -> u32 {
        match field {
            TimeField::Hours => self.hours,
            TimeField::Minutes => self.minutes,
            TimeField::Seconds => self.seconds,
        }
    }

    /// Copy of this TimeSpec with one field replaced
    pub fn with_field(mut self, field: TimeField, value: u32) -> Self {
        match field {
            TimeField::Hours => self.hours = value,
            TimeField::Minutes => self.minutes = value,
            TimeField::Seconds => self.seconds = value,
        }
        self
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// One of the three editable fields of a TimeSpec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

impl TimeField {
    /// Largest value the input control suggests for this field
    pub fn max(&self) -> u32 {
        match self {
            TimeField::Hours => 23,
            TimeField::Minutes | TimeField::Seconds => 59,
        }
    }
}

impl FromStr for TimeField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h" | "hours" => Ok(TimeField::Hours),
            "m" | "minutes" => Ok(TimeField::Minutes),
            "s" | "seconds" => Ok(TimeField::Seconds),
            other => Err(DomainError::BadArgs(format!(
                "Invalid time field: {}. Valid fields: hours, minutes, seconds",
                other
            ))),
        }
    }
}

/// Which end of the cut range is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Start,
    End,
}

/// Named fixed-length clip starting at time zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub label: String,
    pub duration_secs: u32,
}

impl Preset {
    /// Create a preset with validation
    pub fn new(label: impl Into<String>, duration_secs: u32) -> Result<Self, DomainError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DomainError::BadArgs("Preset label cannot be empty".to_string()));
        }
        if label.eq_ignore_ascii_case(CUSTOM_LABEL) {
            return Err(DomainError::BadArgs(format!(
                "Preset label '{}' is reserved",
                CUSTOM_LABEL
            )));
        }
        if duration_secs == 0 {
            return Err(DomainError::BadArgs(format!(
                "Preset '{}' must have a positive duration",
                label
            )));
        }
        Ok(Self {
            label,
            duration_secs,
        })
    }

    /// The stock 10s / 30s / 1m presets
    pub fn defaults() -> Vec<Preset> {
        vec![
            Preset {
                label: "10s".to_string(),
                duration_secs: 10,
            },
            Preset {
                label: "30s".to_string(),
                duration_secs: 30,
            },
            Preset {
                label: "1m".to_string(),
                duration_secs: 60,
            },
        ]
    }
}

/// Label of the custom selection
pub const CUSTOM_LABEL: &str = "custom";

/// Active way of choosing the cut range
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CutSelection {
    Preset(Preset),
    #[default]
    Custom,
}

impl CutSelection {
    /// Label shown on the selection control
    pub fn label(&self) -> &str {
        match self {
            CutSelection::Preset(preset) => &preset.label,
            CutSelection::Custom => CUSTOM_LABEL,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, CutSelection::Custom)
    }
}

/// Validated extraction window handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutRange {
    pub offset_secs: u64,
    pub duration_secs: u64,
}

impl CutRange {
    /// End of the window in seconds
    pub fn end_secs(&self) -> u64 {
        self.offset_secs + self.duration_secs
    }
}

/// Engine and conversion lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionState {
    Idle,
    EngineLoading,
    Ready,
    Converting,
    Failed(String),
}

/// How out-of-range values typed into a time field are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Store the value as typed
    #[default]
    Accept,
    /// Clamp to the field maximum
    Clamp,
    /// Refuse the edit
    Reject,
}

impl FromStr for FieldPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(FieldPolicy::Accept),
            "clamp" => Ok(FieldPolicy::Clamp),
            "reject" => Ok(FieldPolicy::Reject),
            other => Err(DomainError::BadArgs(format!(
                "Invalid field policy: {}. Valid policies: accept, clamp, reject",
                other
            ))),
        }
    }
}

/// Media file attached to the converter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    path: PathBuf,
}

impl MediaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File stem used to name the produced output
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "clip".to_string())
    }
}

#[cfg(test)]
mod tests;
