//! Transcoder command assembly module

use std::time::Duration;

use crate::domain::model::{EncodingLimits, VideoSpec};
use crate::domain::rules::RateLimitRules;
use crate::utils::logging::LogLevel;

pub mod command;

pub use command::CommandBuilder;

/// Transcoder engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Transcoder executable
    pub ffmpeg: String,
    /// Bit rate and sampling caps
    pub limits: EncodingLimits,
    /// Forwarded to the transcoder's own `-v`
    pub log_level: LogLevel,
    /// Per-conversion time limit
    pub timeout: Duration,
}

/// Rates used for every format of one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingSettings {
    pub video_bitrate_kbps: u32,
    pub audio_bitrate_kbps: u32,
    pub audio_sampling_hz: u32,
}

impl EncodingSettings {
    /// Cap the source rates, falling back to the caps when unknown
    pub fn derive(spec: &VideoSpec, limits: &EncodingLimits) -> Self {
        Self {
            video_bitrate_kbps: RateLimitRules::cap(
                spec.video_bitrate_kbps,
                limits.max_video_bitrate_kbps,
            ),
            audio_bitrate_kbps: RateLimitRules::cap(
                spec.audio_bitrate_kbps,
                limits.max_audio_bitrate_kbps,
            ),
            audio_sampling_hz: RateLimitRules::cap(
                spec.audio_sampling_hz,
                limits.max_audio_sampling_hz,
            ),
        }
    }
}
