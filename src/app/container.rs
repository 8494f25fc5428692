use std::sync::Arc;

use crate::adapters::{AppConfig, LocalFsAdapter, TokioProcessAdapter};
use crate::app::{
    batch_walker::{BatchWalker, WalkOptions},
    convert_interactor::ConvertInteractor,
};
use crate::engine::{CommandBuilder, EngineConfig};
use crate::planner::GeometryPlanner;
use crate::ports::{FsPort, ProcessPort};
use crate::probe::VideoInspector;
use crate::utils::logging::LogLevel;

pub trait AppContainer: Send + Sync {
    fn batch_walker(&self, options: WalkOptions) -> BatchWalker;
    fn convert_interactor(&self) -> Arc<ConvertInteractor>;
}

pub struct DefaultAppContainer {
    fs_port: Arc<dyn FsPort>,
    convert_interactor: Arc<ConvertInteractor>,
}

impl DefaultAppContainer {
    /// Wire the real subprocess and filesystem adapters
    pub fn new(config: &AppConfig, log_level: LogLevel) -> Self {
        Self::with_ports(
            config,
            log_level,
            Arc::new(TokioProcessAdapter::new()),
            Arc::new(LocalFsAdapter::new()),
        )
    }

    pub fn with_ports(
        config: &AppConfig,
        log_level: LogLevel,
        process_port: Arc<dyn ProcessPort>,
        fs_port: Arc<dyn FsPort>,
    ) -> Self {
        let inspector = VideoInspector::new(
            Arc::clone(&process_port),
            config.tools.mediainfo.clone(),
            config.tools.inspect_timeout(),
        );
        let builder = CommandBuilder::new(EngineConfig {
            ffmpeg: config.tools.ffmpeg.clone(),
            limits: config.limits,
            log_level,
            timeout: config.tools.convert_timeout(),
        });

        let convert_interactor = Arc::new(ConvertInteractor::new(
            process_port,
            Arc::clone(&fs_port),
            inspector,
            GeometryPlanner::new(config.frame),
            builder,
        ));

        Self {
            fs_port,
            convert_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn batch_walker(&self, options: WalkOptions) -> BatchWalker {
        BatchWalker::new(Arc::clone(&self.fs_port), options)
    }

    fn convert_interactor(&self) -> Arc<ConvertInteractor> {
        Arc::clone(&self.convert_interactor)
    }
}
