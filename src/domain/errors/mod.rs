// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Message shown when the end bound does not come after the start bound
pub const INVALID_RANGE_MESSAGE: &str = "End time must be greater than start time";

/// Message shown when a conversion is requested before the engine has loaded
pub const ENGINE_NOT_READY_MESSAGE: &str = "engine not ready";

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Submit attempted before the engine finished loading
    #[error("{}", ENGINE_NOT_READY_MESSAGE)]
    EngineNotReady,

    /// End bound is not after start bound
    #[error("{0}")]
    InvalidRange(String),

    /// Time formatter returned something other than `HH:MM:SS`
    #[error("Invalid duration format: {0}")]
    MalformedDurationFormat(String),

    /// Media duration never became available
    #[error("Media duration unavailable after {attempts} attempts")]
    DurationTimeout { attempts: u32 },

    /// A conversion is already running
    #[error("A conversion is already in progress")]
    Busy,

    /// No media source is attached
    #[error("No media source selected")]
    NoSource,

    /// The external engine rejected an operation
    #[error("Engine failure: {0}")]
    EngineFailure(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// File system operation failed
    #[error("File system error: {0}")]
    FsFail(String),
}
