// Ports - Interface definitions (contracts)

use crate::domain::errors::*;
use crate::domain::model::*;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Port for the external media conversion engine
///
/// `load` must resolve before any other call. One loaded engine may be shared
/// between several converters; `convert` keeps their jobs from interleaving
/// in the engine's working area.
#[async_trait]
pub trait ConversionEnginePort: Send + Sync {
    /// Initialize the engine
    async fn load(&self) -> Result<(), DomainError>;

    /// Place an input file into the engine's working area
    async fn write_input(&self, name: &str, bytes: Vec<u8>) -> Result<(), DomainError>;

    /// Execute a transcode command line
    async fn run(&self, args: &[String]) -> Result<(), DomainError>;

    /// Read a file the engine produced
    async fn read_output(&self, name: &str) -> Result<Vec<u8>, DomainError>;

    /// Held for the whole write, run and read sequence of one job
    fn job_lock(&self) -> &Mutex<()>;

    /// Write the input, run `args` and read `output_name` as one exclusive job
    async fn convert(
        &self,
        input_name: &str,
        bytes: Vec<u8>,
        args: &[String],
        output_name: &str,
    ) -> Result<Vec<u8>, DomainError> {
        let _job = self.job_lock().lock().await;
        self.write_input(input_name, bytes).await?;
        self.run(args).await?;
        self.read_output(output_name).await
    }
}

/// Port for the media element whose duration is discovered asynchronously
pub trait MediaElementPort: Send + Sync {
    /// Attach a new source; metadata loads in the background
    fn assign_source(&self, source: &MediaSource);

    /// Duration in seconds, NaN or zero until metadata is loaded
    fn duration(&self) -> f64;
}

/// Port for turning seconds into a colon-delimited `HH:MM:SS` string
pub trait TimeFormatterPort: Send + Sync {
    /// `None` signals the formatter could not produce text
    fn to_hhmmss(&self, seconds: f64) -> Option<String>;
}

/// Port for wrapping produced bytes into a caller-visible URL
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    async fn create_object_url(
        &self,
        source: &MediaSource,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<String, DomainError>;
}

/// Caller-supplied setter receiving the output URL
pub trait ResultSink: Send + Sync {
    fn set_output(&self, url: String);
}

impl<F> ResultSink for F
where
    F: Fn(String) + Send + Sync,
{
    fn set_output(&self, url: String) {
        self(url)
    }
}
