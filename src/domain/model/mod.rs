// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{WebvidError, WebvidResult};

/// Web output format produced by one transcoder invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Flv,
    Ogg,
    Mp4,
    Webm,
}

impl OutputFormat {
    /// Every supported format, in default conversion order
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Flv,
        OutputFormat::Ogg,
        OutputFormat::Mp4,
        OutputFormat::Webm,
    ];

    /// Parse a format name (case insensitive, `ogv` is an alias of `ogg`)
    pub fn parse(name: &str) -> WebvidResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "flv" => Ok(OutputFormat::Flv),
            "ogg" | "ogv" => Ok(OutputFormat::Ogg),
            "mp4" => Ok(OutputFormat::Mp4),
            "webm" => Ok(OutputFormat::Webm),
            other => Err(WebvidError::argument(format!(
                "Unknown output format: {}. Valid formats: flv, ogg, mp4, webm",
                other
            ))),
        }
    }

    /// Parse a comma separated list; empty input selects every format
    pub fn parse_list<S: AsRef<str>>(entries: &[S]) -> WebvidResult<Vec<Self>> {
        let mut formats = Vec::new();
        for entry in entries {
            for name in entry.as_ref().split(',') {
                if name.trim().is_empty() {
                    continue;
                }
                let format = Self::parse(name)?;
                if !formats.contains(&format) {
                    formats.push(format);
                }
            }
        }

        if formats.is_empty() {
            formats.extend_from_slice(&Self::ALL);
        }
        Ok(formats)
    }

    /// Canonical name, also used as the file extension and muxer name
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Flv => "flv",
            OutputFormat::Ogg => "ogg",
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Webm => "webm",
        }
    }

    /// File extension for outputs of this format
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Highest frame rate the target codec profile is driven at
    pub fn max_frame_rate(&self) -> f64 {
        match self {
            // Sorenson Spark and H.264 baseline level 3.0 at 640x480
            OutputFormat::Flv | OutputFormat::Mp4 => 30.0,
            OutputFormat::Ogg | OutputFormat::Webm => 60.0,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when an output file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Leave the existing output alone and emit no job
    SkipIfExists,
    /// Rename the existing output to `<output>.bak` first
    Backup,
    /// Replace the existing output
    Overwrite,
}

impl OverwritePolicy {
    /// Resolve the `--exists` / `--backup` flags; skipping wins when both are set
    pub fn from_flags(exists: bool, backup: bool) -> Self {
        if exists {
            OverwritePolicy::SkipIfExists
        } else if backup {
            OverwritePolicy::Backup
        } else {
            OverwritePolicy::Overwrite
        }
    }
}

/// Target bounding box every output is scaled and padded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrameBox {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameBox {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl fmt::Display for FrameBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Upper bounds applied to the source rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncodingLimits {
    pub max_video_bitrate_kbps: u32,
    pub max_audio_bitrate_kbps: u32,
    pub max_audio_sampling_hz: u32,
}

impl Default for EncodingLimits {
    fn default() -> Self {
        Self {
            max_video_bitrate_kbps: 1024,
            max_audio_bitrate_kbps: 56,
            max_audio_sampling_hz: 22050,
        }
    }
}

/// Inspected properties of one input video
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSpec {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
    pub video_bitrate_kbps: Option<u32>,
    pub audio_bitrate_kbps: Option<u32>,
    pub audio_sampling_hz: Option<u32>,
}

impl VideoSpec {
    /// Create a video spec with validation
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32, frame_rate: f64) -> WebvidResult<Self> {
        let path = path.into();
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(WebvidError::Metadata {
                path,
                message: format!("frame rate must be positive, got {}", frame_rate),
            });
        }

        Ok(Self {
            path,
            width,
            height,
            frame_rate,
            video_bitrate_kbps: None,
            audio_bitrate_kbps: None,
            audio_sampling_hz: None,
        })
    }

    /// Attach the optional stream rates
    pub fn with_rates(
        mut self,
        video_bitrate_kbps: Option<u32>,
        audio_bitrate_kbps: Option<u32>,
        audio_sampling_hz: Option<u32>,
    ) -> Self {
        self.video_bitrate_kbps = video_bitrate_kbps;
        self.audio_bitrate_kbps = audio_bitrate_kbps;
        self.audio_sampling_hz = audio_sampling_hz;
        self
    }

    /// Source aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Scaled size plus padding that exactly fills the frame box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetGeometry {
    pub out_width: u32,
    pub out_height: u32,
    pub pad_left: u32,
    pub pad_top: u32,
    pub pad_right: u32,
    pub pad_bottom: u32,
}

impl TargetGeometry {
    /// Width of the padded frame
    pub fn box_width(&self) -> u32 {
        self.out_width + self.pad_left + self.pad_right
    }

    /// Height of the padded frame
    pub fn box_height(&self) -> u32 {
        self.out_height + self.pad_top + self.pad_bottom
    }

    /// Video filter chain: scale to the content size, then pad to the box
    pub fn filter_expression(&self) -> String {
        format!(
            "scale={}:{},pad={}:{}:{}:{}",
            self.out_width,
            self.out_height,
            self.box_width(),
            self.box_height(),
            self.pad_left,
            self.pad_top
        )
    }
}

/// One (file, format) conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub overwrite_policy: OverwritePolicy,
    pub dry_run: bool,
    /// Set when the output existed at planning time and must be renamed first
    pub backup_path: Option<PathBuf>,
}

impl ConversionJob {
    /// Staging file the transcoder writes before the final rename
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self.output_path.file_stem().unwrap_or_default().to_os_string();
        name.push(".tmp.");
        name.push(self.format.extension());
        match self.output_path.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }
}

/// Backup location for an existing output
pub fn backup_path_for(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Final state of one (file, format) pair
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    /// Output produced
    Converted,
    /// Output already existed and `--exists` was set
    Skipped,
    /// Dry run; carries the command that would have run
    Planned(String),
    /// Any failure; carries the rendered error
    Failed(String),
}

/// Outcome of one (file, format) pair
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub status: JobStatus,
}

/// Everything that happened during a run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<JobOutcome>,
    /// Failures not tied to a (file, format) pair, such as unreadable directories
    pub errors: Vec<String>,
}

impl RunReport {
    pub fn converted(&self) -> usize {
        self.count(|s| matches!(s, JobStatus::Converted))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, JobStatus::Skipped))
    }

    pub fn planned(&self) -> usize {
        self.count(|s| matches!(s, JobStatus::Planned(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, JobStatus::Failed(_)))
    }

    /// True when nothing failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.errors.is_empty()
    }

    /// Commands recorded by a dry run, in execution order
    pub fn planned_commands(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            JobStatus::Planned(command) => Some(command.as_str()),
            _ => None,
        })
    }

    fn count(&self, predicate: impl Fn(&JobStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.status)).count()
    }
}

#[cfg(test)]
mod tests;
