//! gifcut Library
//!
//! Trim a video file to a time range and convert the segment to an animated
//! GIF with an external ffmpeg engine.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use app::{AppContainer, ClipConverter, ConverterPorts, ConverterSettings, ConverterView};
pub use domain::errors::DomainError;
pub use domain::model::{
    Bound, ConversionState, CutRange, CutSelection, FieldPolicy, MediaSource, Preset, TimeField,
    TimeSpec,
};
pub use error::{GifcutError, GifcutResult};
