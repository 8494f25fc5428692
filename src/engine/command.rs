//! Per-format transcoder command lines

use crate::domain::model::{ConversionJob, OutputFormat, TargetGeometry, VideoSpec};
use crate::domain::rules::FrameRateRules;
use crate::engine::{EncodingSettings, EngineConfig};
use crate::ports::ToolCommand;

/// Keyframe interval shared by every format
const GOP_SIZE: &str = "160";
/// Rate-control ceiling for the H.264 baseline profile
const MP4_MAX_RATE: &str = "10000000";
/// Sampling rate required by the FLV and MP4 audio paths
const FIXED_SAMPLING_HZ: u32 = 22050;

/// Builds transcoder invocations; never executes anything
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    config: EngineConfig,
}

impl CommandBuilder {
    /// Create a new command builder
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assemble the command for one job.
    ///
    /// The output argument is the job's staging path; the caller moves it onto
    /// the final output once the transcoder succeeds.
    pub fn build(
        &self,
        job: &ConversionJob,
        spec: &VideoSpec,
        geometry: &TargetGeometry,
    ) -> ToolCommand {
        let settings = EncodingSettings::derive(spec, &self.config.limits);
        let frame_rate = FrameRateRules::output_frame_rate(spec.frame_rate, job.format);

        let command = ToolCommand::new(&self.config.ffmpeg)
            .arg("-y")
            .opt("-i", &job.input_path);
        let command = self.codec_args(command, job.format);

        let (channels, sampling_hz) = match job.format {
            OutputFormat::Flv => ("1", FIXED_SAMPLING_HZ),
            OutputFormat::Mp4 => ("2", FIXED_SAMPLING_HZ),
            OutputFormat::Ogg | OutputFormat::Webm => ("1", settings.audio_sampling_hz),
        };

        command
            .opt("-f", job.format.as_str())
            .opt("-r", FrameRateRules::format_rate(frame_rate))
            .opt("-b:v", format!("{}k", settings.video_bitrate_kbps))
            .opt("-g", GOP_SIZE)
            .opt("-cmp", "dct")
            .opt("-subcmp", "dct")
            .opt("-mbd", "2")
            .opt("-trellis", "1")
            .opt("-ac", channels)
            .opt("-ar", sampling_hz.to_string())
            .opt("-b:a", format!("{}k", settings.audio_bitrate_kbps))
            .opt("-v", self.config.log_level.transcoder_level())
            .opt("-vf", geometry.filter_expression())
            .arg(job.staging_path())
            .with_timeout(self.config.timeout)
    }

    fn codec_args(&self, command: ToolCommand, format: OutputFormat) -> ToolCommand {
        match format {
            OutputFormat::Flv => command.opt("-vcodec", "flv"),
            OutputFormat::Mp4 => command
                .opt("-vcodec", "libx264")
                .opt("-acodec", "aac")
                .opt("-preset", "slow")
                .opt("-profile:v", "baseline")
                .opt("-level", "30")
                .opt("-pix_fmt", "yuv420p")
                .opt("-maxrate", MP4_MAX_RATE)
                .opt("-bufsize", MP4_MAX_RATE)
                .opt("-threads", "0"),
            OutputFormat::Webm => command.opt("-vcodec", "libvpx").opt("-acodec", "libvorbis"),
            OutputFormat::Ogg => command.opt("-vcodec", "libtheora").opt("-acodec", "libvorbis"),
        }
    }
}
