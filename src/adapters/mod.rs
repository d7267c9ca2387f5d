// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_blob;
pub mod mock_engine;
pub mod mock_media;
pub mod probe_ffprobe;
pub mod time_format;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::FfmpegCliEngine;
pub use fs_blob::{FsBlobStore, MemoryBlobStore};
pub use mock_engine::MockEngineAdapter;
pub use mock_media::MockMediaElement;
pub use probe_ffprobe::FfprobeMediaElement;
pub use time_format::HhMmSsFormatter;
pub use toml_config::AppConfig;
pub use tracing_log::{init_logging, LogFormat};
