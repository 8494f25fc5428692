//! WebVid Batch Web Video Converter Library
//!
//! Plans and runs conversions of source videos into web formats by driving
//! external inspection and transcoding tools.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod planner;
pub mod ports;
pub mod probe;
pub mod utils;

// Re-export commonly used types
pub use domain::model::{
    ConversionJob, FrameBox, JobOutcome, JobStatus, OutputFormat, OverwritePolicy, RunReport,
    TargetGeometry, VideoSpec,
};
pub use error::{WebvidError, WebvidResult};
