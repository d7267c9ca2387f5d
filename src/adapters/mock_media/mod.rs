// Mock media adapter - Media element whose duration is set by hand

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::model::*;
use crate::ports::*;

#[derive(Default)]
struct MediaState {
    current: Option<PathBuf>,
    durations: HashMap<PathBuf, f64>,
    assigned: Vec<PathBuf>,
}

/// Media element double
#[derive(Default)]
pub struct MockMediaElement {
    state: Mutex<MediaState>,
}

impl MockMediaElement {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MediaState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Report `seconds` once `path` is the current source
    pub fn set_duration(&self, path: impl Into<PathBuf>, seconds: f64) {
        self.lock().durations.insert(path.into(), seconds);
    }

    /// Sources assigned so far, oldest first
    pub fn assigned(&self) -> Vec<PathBuf> {
        self.lock().assigned.clone()
    }
}

impl MediaElementPort for MockMediaElement {
    fn assign_source(&self, source: &MediaSource) {
        let mut state = self.lock();
        state.current = Some(source.path().to_path_buf());
        state.assigned.push(source.path().to_path_buf());
    }

    fn duration(&self) -> f64 {
        let state = self.lock();
        state
            .current
            .as_ref()
            .and_then(|path| state.durations.get(path).copied())
            .unwrap_or(f64::NAN)
    }
}
