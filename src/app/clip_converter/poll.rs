// Duration discovery - retries until the media element reports a duration

use std::sync::Weak;

use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use super::Inner;
use crate::domain::errors::DomainError;
use crate::domain::model::TimeSpec;
use crate::domain::rules::{duration_from_formatted, is_duration_known};

/// Start polling for the duration of the source tagged `generation`
pub(super) fn spawn(inner: Weak<Inner>, generation: u64) -> JoinHandle<()> {
    tokio::spawn(watch_duration(inner, generation))
}

async fn watch_duration(inner: Weak<Inner>, generation: u64) {
    let (interval, max_attempts) = match inner.upgrade() {
        Some(inner) => (
            inner.settings.poll_interval,
            inner.settings.max_poll_attempts,
        ),
        None => return,
    };

    for attempt in 1..=max_attempts {
        tokio::time::sleep(interval).await;

        let Some(inner) = inner.upgrade() else {
            return;
        };
        if inner.lock().generation != generation {
            return;
        }

        let seconds = inner.ports.media.duration();
        if !is_duration_known(seconds) {
            trace!(attempt, "Media duration not available yet");
            continue;
        }

        match duration_from_formatted(inner.ports.formatter.to_hhmmss(seconds)) {
            Ok(duration) => apply_duration(&inner, generation, duration),
            Err(e) => {
                // Logged only; the bounds keep their previous values
                error!(error = %e, seconds, "Invalid duration format");
                clear_poll(&inner, generation);
            }
        }
        return;
    }

    if let Some(inner) = inner.upgrade() {
        let err = DomainError::DurationTimeout {
            attempts: max_attempts,
        };
        warn!(error = %err, "Giving up on media duration");
        {
            let mut state = inner.lock();
            if state.generation != generation {
                return;
            }
            state.poll = None;
            state.error = Some(err.to_string());
        }
        inner.bump();
    }
}

fn apply_duration(inner: &Inner, generation: u64, duration: TimeSpec) {
    {
        let mut state = inner.lock();
        if state.generation != generation {
            return;
        }
        debug!(duration = %duration, "Media duration discovered");
        state.video_duration = duration;
        state.start = TimeSpec::zero();
        state.end = duration;
        state.duration_known = true;
        state.poll = None;
    }
    inner.bump();
}

fn clear_poll(inner: &Inner, generation: u64) {
    let mut state = inner.lock();
    if state.generation == generation {
        state.poll = None;
    }
}
