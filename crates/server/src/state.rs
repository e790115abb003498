use std::sync::Arc;

use chapterino_core::{
    Config, ConversionPipeline, FfmpegTranscoder, FfprobeProber, ZipArchiver,
};

/// The production pipeline wiring used by the web adapter.
pub type AppPipeline = ConversionPipeline<FfprobeProber, FfmpegTranscoder, ZipArchiver>;

/// Shared application state
pub struct AppState {
    config: Config,
    pipeline: Arc<AppPipeline>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let pipeline = Arc::new(ConversionPipeline::new(
            FfprobeProber::new(config.tools.clone()),
            FfmpegTranscoder::new(config.tools.clone()),
            ZipArchiver::new(),
        ));
        Self { config, pipeline }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pipeline(&self) -> &AppPipeline {
        &self.pipeline
    }
}
