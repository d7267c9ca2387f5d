//! FFprobe adapter for media duration discovery
//!
//! Plays the role of a media element: assigning a source starts a background
//! `ffprobe` run and the duration reads as NaN until it reports.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

struct ProbeState {
    generation: u64,
    duration: f64,
}

/// FFprobe-backed media element
pub struct FfprobeMediaElement {
    ffprobe_path: PathBuf,
    state: Arc<Mutex<ProbeState>>,
}

fn lock(state: &Mutex<ProbeState>) -> MutexGuard<'_, ProbeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FfprobeMediaElement {
    /// Create new FFprobe adapter
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            state: Arc::new(Mutex::new(ProbeState {
                generation: 0,
                duration: f64::NAN,
            })),
        }
    }
}

/// Ask ffprobe for the container duration of `path`
pub async fn probe_duration(ffprobe_path: &Path, path: &Path) -> Result<f64, DomainError> {
    let output = Command::new(ffprobe_path)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| {
            DomainError::EngineFailure(format!(
                "Failed to launch {}: {}",
                ffprobe_path.display(),
                e
            ))
        })?;

    if !output.status.success() {
        return Err(DomainError::EngineFailure(format!(
            "ffprobe exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_duration_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parse the single number ffprobe prints for `format=duration`
fn parse_duration_output(stdout: &str) -> Result<f64, DomainError> {
    let text = stdout.trim();
    text.parse::<f64>()
        .map_err(|_| DomainError::EngineFailure(format!("Unexpected ffprobe output: {:?}", text)))
}

impl MediaElementPort for FfprobeMediaElement {
    fn assign_source(&self, source: &MediaSource) {
        let generation = {
            let mut state = lock(&self.state);
            state.generation = state.generation.wrapping_add(1);
            state.duration = f64::NAN;
            state.generation
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime; media duration will stay unknown");
            return;
        };

        let state = Arc::clone(&self.state);
        let ffprobe_path = self.ffprobe_path.clone();
        let path = source.path().to_path_buf();
        runtime.spawn(async move {
            match probe_duration(&ffprobe_path, &path).await {
                Ok(seconds) => {
                    let mut state = lock(&state);
                    if state.generation == generation {
                        debug!(seconds, path = %path.display(), "Media metadata loaded");
                        state.duration = seconds;
                    }
                }
                Err(e) => warn!(error = %e, path = %path.display(), "Failed to probe media"),
            }
        });
    }

    fn duration(&self) -> f64 {
        lock(&self.state).duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_output() {
        assert_eq!(parse_duration_output("125.000000\n").unwrap(), 125.0);
        assert!(parse_duration_output("N/A\n").is_err());
        assert!(parse_duration_output("").is_err());
    }

    #[test]
    fn test_duration_unknown_before_probe() {
        let media = FfprobeMediaElement::new("ffprobe");
        assert!(media.duration().is_nan());
    }

    #[tokio::test]
    async fn test_failed_probe_leaves_duration_unknown() {
        let media = FfprobeMediaElement::new("/nonexistent/gifcut-ffprobe");
        media.assign_source(&MediaSource::new("/nonexistent/video.mp4"));
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(media.duration().is_nan());
    }
}
