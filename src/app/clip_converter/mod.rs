// Clip converter - Cut-range form state, engine lifecycle and conversion

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

mod poll;

/// Tunables for a converter instance
#[derive(Debug, Clone)]
pub struct ConverterSettings {
    pub presets: Vec<Preset>,
    pub normalize_presets: bool,
    pub field_policy: FieldPolicy,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            presets: Preset::defaults(),
            normalize_presets: true,
            field_policy: FieldPolicy::Accept,
            poll_interval: Duration::from_millis(100),
            max_poll_attempts: 600,
        }
    }
}

/// Collaborators injected into a converter
#[derive(Clone)]
pub struct ConverterPorts {
    pub engine: Arc<dyn ConversionEnginePort>,
    pub media: Arc<dyn MediaElementPort>,
    pub formatter: Arc<dyn TimeFormatterPort>,
    pub blobs: Arc<dyn BlobStorePort>,
    pub sink: Arc<dyn ResultSink>,
}

/// Snapshot of everything a front end renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConverterView {
    pub selection: String,
    pub start: TimeSpec,
    pub end: TimeSpec,
    pub video_duration: TimeSpec,
    pub duration_known: bool,
    pub error: Option<String>,
    pub state: ConversionState,
    pub ready: bool,
    pub converting: bool,
    pub busy: bool,
    pub visible: bool,
    pub button_label: String,
}

#[derive(Debug, Clone, PartialEq)]
enum EngineStatus {
    NotStarted,
    Loading,
    Ready,
    Failed(String),
}

struct FormState {
    selection: CutSelection,
    start: TimeSpec,
    end: TimeSpec,
    video_duration: TimeSpec,
    duration_known: bool,
    error: Option<String>,
    engine: EngineStatus,
    converting: bool,
    source: Option<MediaSource>,
    generation: u64,
    poll: Option<JoinHandle<()>>,
}

impl FormState {
    fn new() -> Self {
        Self {
            selection: CutSelection::Custom,
            start: TimeSpec::zero(),
            end: TimeSpec::zero(),
            video_duration: TimeSpec::zero(),
            duration_known: false,
            error: None,
            engine: EngineStatus::NotStarted,
            converting: false,
            source: None,
            generation: 0,
            poll: None,
        }
    }

    fn conversion_state(&self) -> ConversionState {
        match &self.engine {
            EngineStatus::Failed(reason) => ConversionState::Failed(reason.clone()),
            EngineStatus::NotStarted => ConversionState::Idle,
            EngineStatus::Loading => ConversionState::EngineLoading,
            EngineStatus::Ready if self.converting => ConversionState::Converting,
            EngineStatus::Ready => ConversionState::Ready,
        }
    }
}

pub(crate) struct Inner {
    ports: ConverterPorts,
    settings: ConverterSettings,
    state: Mutex<FormState>,
    revision: watch::Sender<u64>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Tell observers the state changed
    fn bump(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    fn set_error(&self, err: &DomainError) {
        self.lock().error = Some(err.to_string());
        self.bump();
    }

    async fn run_conversion(
        &self,
        source: &MediaSource,
        range: &CutRange,
    ) -> Result<String, DomainError> {
        let bytes = tokio::fs::read(source.path()).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to read {}: {}",
                source.path().display(),
                e
            ))
        })?;

        info!(
            offset = range.offset_secs,
            duration = range.duration_secs,
            "Running conversion"
        );
        let output = self
            .ports
            .engine
            .convert(INPUT_FILE_NAME, bytes, &convert_args(range), OUTPUT_FILE_NAME)
            .await?;
        debug!(bytes = output.len(), "Engine produced output");

        self.ports
            .blobs
            .create_object_url(source, output, OUTPUT_MIME)
            .await
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(poll) = state.poll.take() {
            poll.abort();
        }
    }
}

/// Resets the converting flag however the conversion future ends
struct ConvertingGuard<'a> {
    inner: &'a Inner,
}

impl Drop for ConvertingGuard<'_> {
    fn drop(&mut self) {
        self.inner.lock().converting = false;
        self.inner.bump();
    }
}

/// Headless trim-and-convert component.
///
/// Cloning yields another handle to the same component. Methods that start
/// background work (`mount`, `set_source`) must run inside a tokio runtime.
#[derive(Clone)]
pub struct ClipConverter {
    inner: Arc<Inner>,
}

impl ClipConverter {
    /// Create new converter with injected ports
    pub fn new(ports: ConverterPorts, settings: ConverterSettings) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                ports,
                settings,
                state: Mutex::new(FormState::new()),
                revision,
            }),
        }
    }

    /// Presets offered by this converter
    pub fn presets(&self) -> &[Preset] {
        &self.inner.settings.presets
    }

    /// Start loading the engine. Only the first call has an effect.
    pub fn mount(&self) {
        {
            let mut state = self.inner.lock();
            if state.engine != EngineStatus::NotStarted {
                debug!("Converter already mounted");
                return;
            }
            state.engine = EngineStatus::Loading;
        }
        self.inner.bump();

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = inner.ports.engine.load().await;
            {
                let mut state = inner.lock();
                match result {
                    Ok(()) => {
                        info!("Conversion engine ready");
                        state.engine = EngineStatus::Ready;
                    }
                    Err(e) => {
                        error!(error = %e, "Conversion engine failed to load");
                        state.error = Some(e.to_string());
                        state.engine = EngineStatus::Failed(e.to_string());
                    }
                }
            }
            inner.bump();
        });
    }

    /// Attach or detach the media source.
    ///
    /// Any duration poll still running for the previous source is cancelled.
    pub fn set_source(&self, source: Option<MediaSource>) {
        let generation = {
            let mut state = self.inner.lock();
            state.generation = state.generation.wrapping_add(1);
            if let Some(previous) = state.poll.take() {
                debug!("Cancelling superseded duration poll");
                previous.abort();
            }
            state.duration_known = false;
            state.source = source.clone();
            state.generation
        };

        // No state lock held across port calls
        if let Some(source) = source {
            info!(source = %source.path().display(), "Media source assigned");
            self.inner.ports.media.assign_source(&source);

            let task = poll::spawn(Arc::downgrade(&self.inner), generation);
            let mut state = self.inner.lock();
            if state.generation == generation {
                state.poll = Some(task);
            } else {
                task.abort();
            }
        }
        self.inner.bump();
    }

    /// Choose a preset (or "custom") by label
    pub fn select(&self, label: &str) -> Result<(), DomainError> {
        if label.eq_ignore_ascii_case(CUSTOM_LABEL) {
            self.select_custom();
            Ok(())
        } else {
            self.select_preset(label)
        }
    }

    /// Switch to a preset: start at zero, end after the preset duration
    pub fn select_preset(&self, label: &str) -> Result<(), DomainError> {
        let preset = find_preset(&self.inner.settings.presets, label)?.clone();
        let (start, end) = preset_bounds(&preset, self.inner.settings.normalize_presets);
        {
            let mut state = self.inner.lock();
            debug!(preset = %preset.label, end = %end, "Preset selected");
            state.selection = CutSelection::Preset(preset);
            state.start = start;
            state.end = end;
        }
        self.inner.bump();
        Ok(())
    }

    /// Switch to custom bounds: start at zero, end at the known media duration
    pub fn select_custom(&self) {
        {
            let mut state = self.inner.lock();
            state.selection = CutSelection::Custom;
            state.start = TimeSpec::zero();
            state.end = state.video_duration;
        }
        self.inner.bump();
    }

    /// Edit one field of the start or end bound (custom mode only)
    pub fn set_field(&self, bound: Bound, field: TimeField, value: u32) -> Result<(), DomainError> {
        let value = self.inner.settings.field_policy.apply(field, value)?;
        {
            let mut state = self.inner.lock();
            if !state.selection.is_custom() {
                return Err(DomainError::BadArgs(format!(
                    "Time fields can only be edited in custom mode (current: {})",
                    state.selection.label()
                )));
            }
            match bound {
                Bound::Start => state.start = state.start.with_field(field, value),
                Bound::End => state.end = state.end.with_field(field, value),
            }
        }
        self.inner.bump();
        Ok(())
    }

    /// Validate the range and run one conversion.
    ///
    /// On success the output URL goes to the result sink and is returned.
    pub async fn submit(&self) -> Result<String, DomainError> {
        let (range, source) = {
            let mut state = self.inner.lock();

            if state.engine != EngineStatus::Ready {
                drop(state);
                warn!("Submit rejected: engine not ready");
                let err = DomainError::EngineNotReady;
                self.inner.set_error(&err);
                return Err(err);
            }
            if state.converting {
                return Err(DomainError::Busy);
            }

            let range = match validate_range(&state.start, &state.end) {
                Ok(range) => range,
                Err(err) => {
                    drop(state);
                    self.inner.set_error(&err);
                    return Err(err);
                }
            };

            let Some(source) = state.source.clone() else {
                drop(state);
                let err = DomainError::NoSource;
                self.inner.set_error(&err);
                return Err(err);
            };

            state.error = None;
            state.converting = true;
            (range, source)
        };
        self.inner.bump();

        let outcome = {
            let _guard = ConvertingGuard { inner: &self.inner };
            self.inner.run_conversion(&source, &range).await
        };

        match outcome {
            Ok(url) => {
                info!(url = %url, "Conversion finished");
                self.inner.ports.sink.set_output(url.clone());
                Ok(url)
            }
            Err(e) => {
                error!(error = %e, "Conversion failed");
                let err = match e {
                    DomainError::EngineFailure(_) => e,
                    other => DomainError::EngineFailure(other.to_string()),
                };
                self.inner.set_error(&err);
                Err(err)
            }
        }
    }

    /// Current state for rendering
    pub fn view(&self) -> ConverterView {
        let state = self.inner.lock();
        let ready = state.engine == EngineStatus::Ready;
        let button_label = if !ready {
            "Loading ffmpeg"
        } else if state.converting {
            "Converting..."
        } else {
            "Convert"
        };

        ConverterView {
            selection: state.selection.label().to_string(),
            start: state.start,
            end: state.end,
            video_duration: state.video_duration,
            duration_known: state.duration_known,
            error: state.error.clone(),
            state: state.conversion_state(),
            ready,
            converting: state.converting,
            busy: !ready || state.converting,
            visible: state.source.is_some(),
            button_label: button_label.to_string(),
        }
    }

    /// Wait until `predicate` holds for the view, or give up after `timeout`
    pub async fn wait_until<F>(&self, timeout: Duration, mut predicate: F) -> Option<ConverterView>
    where
        F: FnMut(&ConverterView) -> bool,
    {
        let mut changes = self.inner.revision.subscribe();
        let wait = async {
            loop {
                let view = self.view();
                if predicate(&view) {
                    return Some(view);
                }
                if changes.changed().await.is_err() {
                    return None;
                }
            }
        };

        tokio::time::timeout(timeout, wait).await.ok().flatten()
    }
}
