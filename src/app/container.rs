use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::{
    AppConfig, FfmpegCliEngine, FfprobeMediaElement, FsBlobStore, HhMmSsFormatter,
};
use crate::app::clip_converter::{ClipConverter, ConverterPorts};
use crate::ports::{ConversionEnginePort, ResultSink};

/// Wires the production adapters from configuration.
///
/// One engine is shared by every converter the container builds.
pub struct AppContainer {
    config: AppConfig,
    engine: Arc<FfmpegCliEngine>,
}

impl AppContainer {
    pub fn new(config: AppConfig) -> Self {
        let engine = Arc::new(FfmpegCliEngine::new(&config.ffmpeg_path));
        Self { config, engine }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build a converter writing its output to `output`, or into the
    /// configured output directory when `None`
    pub fn clip_converter(&self, sink: Arc<dyn ResultSink>, output: Option<PathBuf>) -> ClipConverter {
        let mut blobs = FsBlobStore::new(&self.config.output_dir);
        if let Some(output) = output {
            blobs = blobs.with_target(output);
        }

        let ports = ConverterPorts {
            engine: Arc::clone(&self.engine) as Arc<dyn ConversionEnginePort>,
            media: Arc::new(FfprobeMediaElement::new(&self.config.ffprobe_path)),
            formatter: Arc::new(HhMmSsFormatter::new()),
            blobs: Arc::new(blobs),
            sink,
        };

        ClipConverter::new(ports, self.config.converter_settings())
    }
}
