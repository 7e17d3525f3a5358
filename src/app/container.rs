use std::sync::Arc;

use crate::adapters::{DryRunAdapter, FfmpegCliAdapter, LocalFsAdapter};
use crate::app::{
    convert_interactor::ConvertInteractor, hls_interactor::HlsInteractor,
    playback_interactor::PlaybackInteractor, transcode_interactor::TranscodeInteractor,
    trim_interactor::TrimInteractor,
};
use crate::ports::{ConfigPort, ExecutePort, FsPort, PlayerPort};

pub trait AppContainer: Send + Sync {
    fn trim_interactor(&self) -> Arc<TrimInteractor>;
    fn transcode_interactor(&self) -> Arc<TranscodeInteractor>;
    fn convert_interactor(&self) -> Arc<ConvertInteractor>;
    fn hls_interactor(&self) -> Arc<HlsInteractor>;
    fn config_port(&self) -> Arc<dyn ConfigPort>;
}

pub struct DefaultAppContainer {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    config_port: Arc<dyn ConfigPort>,
    trim_interactor: Arc<TrimInteractor>,
    transcode_interactor: Arc<TranscodeInteractor>,
    convert_interactor: Arc<ConvertInteractor>,
    hls_interactor: Arc<HlsInteractor>,
}

impl DefaultAppContainer {
    /// Wire the production adapters around an already loaded configuration.
    /// `dry_run` swaps the ffmpeg runner for one that only records commands.
    pub async fn new(config_port: Arc<dyn ConfigPort>, dry_run: bool) -> Self {
        let execute_port: Arc<dyn ExecutePort> = if dry_run {
            Arc::new(DryRunAdapter::new())
        } else {
            let config = config_port.current().await;
            Arc::new(FfmpegCliAdapter::new(&config.engine))
        };
        let fs_port: Arc<dyn FsPort> = Arc::new(LocalFsAdapter::new());

        Self::with_ports(execute_port, fs_port, config_port)
    }

    pub fn with_ports(
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        config_port: Arc<dyn ConfigPort>,
    ) -> Self {
        let trim_interactor = Arc::new(TrimInteractor::new(
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
            Arc::clone(&config_port),
        ));

        let transcode_interactor = Arc::new(TranscodeInteractor::new(
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
            Arc::clone(&config_port),
        ));

        let convert_interactor = Arc::new(ConvertInteractor::new(
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
            Arc::clone(&config_port),
        ));

        let hls_interactor = Arc::new(HlsInteractor::new(
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
            Arc::clone(&config_port),
        ));

        Self {
            execute_port,
            fs_port,
            config_port,
            trim_interactor,
            transcode_interactor,
            convert_interactor,
            hls_interactor,
        }
    }

    pub fn execute_port(&self) -> Arc<dyn ExecutePort> {
        Arc::clone(&self.execute_port)
    }

    /// Viewer controller over a host-supplied player widget
    pub fn playback_interactor(&self, player: Arc<dyn PlayerPort>) -> PlaybackInteractor {
        PlaybackInteractor::new(player, Arc::clone(&self.fs_port))
    }
}

impl AppContainer for DefaultAppContainer {
    fn trim_interactor(&self) -> Arc<TrimInteractor> {
        Arc::clone(&self.trim_interactor)
    }

    fn transcode_interactor(&self) -> Arc<TranscodeInteractor> {
        Arc::clone(&self.transcode_interactor)
    }

    fn convert_interactor(&self) -> Arc<ConvertInteractor> {
        Arc::clone(&self.convert_interactor)
    }

    fn hls_interactor(&self) -> Arc<HlsInteractor> {
        Arc::clone(&self.hls_interactor)
    }

    fn config_port(&self) -> Arc<dyn ConfigPort> {
        Arc::clone(&self.config_port)
    }
}
