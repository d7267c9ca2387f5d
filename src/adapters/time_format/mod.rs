// Time format adapter - Seconds to HH:MM:SS

use crate::ports::*;

/// Zero-padded `HH:MM:SS` formatter; fractional seconds are truncated and
/// hours are not wrapped at 24
#[derive(Debug, Default, Clone, Copy)]
pub struct HhMmSsFormatter;

impl HhMmSsFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl TimeFormatterPort for HhMmSsFormatter {
    fn to_hhmmss(&self, seconds: f64) -> Option<String> {
        if !seconds.is_finite() || seconds < 0.0 {
            return None;
        }

        let total = seconds.trunc() as u64;
        Some(format!(
            "{:02}:{:02}:{:02}",
            total / 3600,
            (total % 3600) / 60,
            total % 60
        ))
    }
}
