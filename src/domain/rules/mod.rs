// Domain rules - Range validation and selection policies

use crate::domain::errors::*;
use crate::domain::model::*;

/// Name the source media is written under inside the engine
pub const INPUT_FILE_NAME: &str = "test.mp4";

/// Name the engine writes the animation to
pub const OUTPUT_FILE_NAME: &str = "out.gif";

/// Container format requested from the engine
pub const OUTPUT_FORMAT: &str = "gif";

/// MIME type attached to the produced blob
pub const OUTPUT_MIME: &str = "image/gif";

/// Check that `end` comes strictly after `start` and derive the window.
///
/// Only the totals are compared; neither the media duration nor the
/// per-field bounds are consulted.
pub fn validate_range(start: &TimeSpec, end: &TimeSpec) -> Result<CutRange, DomainError> {
    let start_secs = start.total_seconds();
    let end_secs = end.total_seconds();

    if end_secs <= start_secs {
        return Err(DomainError::InvalidRange(INVALID_RANGE_MESSAGE.to_string()));
    }

    Ok(CutRange {
        offset_secs: start_secs,
        duration_secs: end_secs - start_secs,
    })
}

/// Bounds seeded when a preset is chosen
pub fn preset_bounds(preset: &Preset, normalize: bool) -> (TimeSpec, TimeSpec) {
    let end = if normalize {
        TimeSpec::from_total_seconds(u64::from(preset.duration_secs))
    } else {
        TimeSpec::from_raw_seconds(preset.duration_secs)
    };
    (TimeSpec::zero(), end)
}

/// Engine argument list for extracting `range` as a GIF
pub fn convert_args(range: &CutRange) -> Vec<String> {
    vec![
        "-i".to_string(),
        INPUT_FILE_NAME.to_string(),
        "-t".to_string(),
        range.duration_secs.to_string(),
        "-ss".to_string(),
        range.offset_secs.to_string(),
        "-f".to_string(),
        OUTPUT_FORMAT.to_string(),
        OUTPUT_FILE_NAME.to_string(),
    ]
}

/// A media duration counts once it is a positive finite number
pub fn is_duration_known(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// Turn formatter output back into a TimeSpec
pub fn duration_from_formatted(formatted: Option<String>) -> Result<TimeSpec, DomainError> {
    match formatted {
        Some(text) => TimeSpec::parse_hms(&text),
        None => Err(DomainError::MalformedDurationFormat(
            "formatter returned no text".to_string(),
        )),
    }
}

impl FieldPolicy {
    /// Apply the policy to a value typed into `field`
    pub fn apply(&self, field: TimeField, value: u32) -> Result<u32, DomainError> {
        let max = field.max();
        match self {
            FieldPolicy::Accept => Ok(value),
            FieldPolicy::Clamp => Ok(value.min(max)),
            FieldPolicy::Reject if value > max => Err(DomainError::BadArgs(format!(
                "{:?} must be at most {}, got {}",
                field, max, value
            ))),
            FieldPolicy::Reject => Ok(value),
        }
    }
}

/// Find a preset by label, ignoring case
pub fn find_preset<'a>(presets: &'a [Preset], label: &str) -> Result<&'a Preset, DomainError> {
    presets
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label))
        .ok_or_else(|| {
            let known: Vec<&str> = presets.iter().map(|p| p.label.as_str()).collect();
            DomainError::BadArgs(format!(
                "Unknown preset '{}'. Available presets: {}",
                label,
                known.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests;
