// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::model::{EncodingLimits, FrameBox};
use crate::error::{WebvidError, WebvidResult};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "webvid.toml";

/// External tool settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Transcoder executable
    pub ffmpeg: String,
    /// Inspection executable
    pub mediainfo: String,
    pub inspect_timeout_secs: u64,
    pub convert_timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            mediainfo: "mediainfo".to_string(),
            inspect_timeout_secs: 60,
            convert_timeout_secs: 3600,
        }
    }
}

impl ToolsConfig {
    pub fn inspect_timeout(&self) -> Duration {
        Duration::from_secs(self.inspect_timeout_secs)
    }

    pub fn convert_timeout(&self) -> Duration {
        Duration::from_secs(self.convert_timeout_secs)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub tools: ToolsConfig,
    pub frame: FrameBox,
    pub limits: EncodingLimits,
}

impl AppConfig {
    /// Validate configuration
    pub fn validate(&self) -> WebvidResult<()> {
        if self.tools.ffmpeg.trim().is_empty() || self.tools.mediainfo.trim().is_empty() {
            return Err(config_error("tool paths cannot be empty"));
        }
        if self.tools.inspect_timeout_secs == 0 || self.tools.convert_timeout_secs == 0 {
            return Err(config_error("timeouts must be at least one second"));
        }
        if self.frame.width < 2 || self.frame.height < 2 {
            return Err(config_error(format!(
                "frame box {} is too small, minimum is 2x2",
                self.frame
            )));
        }
        let limits = &self.limits;
        if limits.max_video_bitrate_kbps == 0
            || limits.max_audio_bitrate_kbps == 0
            || limits.max_audio_sampling_hz == 0
        {
            return Err(config_error("encoding limits must be positive"));
        }
        Ok(())
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Deserialize config from TOML string
    pub fn parse(toml_content: &str) -> WebvidResult<AppConfig> {
        toml::from_str(toml_content)
            .map_err(|e| config_error(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> WebvidResult<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Default config file path, if one exists in the working directory
    pub fn default_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        path.is_file().then_some(path)
    }
}

fn config_error(message: impl Into<String>) -> WebvidError {
    WebvidError::Config {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfigAdapter::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.frame, FrameBox { width: 640, height: 480 });
        assert_eq!(config.tools.ffmpeg, "ffmpeg");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_overrides_fields() {
        let config = TomlConfigAdapter::parse(
            r#"
            [tools]
            ffmpeg = "/usr/local/bin/ffmpeg"
            convert_timeout_secs = 120

            [frame]
            width = 1280
            "#,
        )
        .unwrap();

        assert_eq!(config.tools.ffmpeg, "/usr/local/bin/ffmpeg");
        assert_eq!(config.tools.mediainfo, "mediainfo");
        assert_eq!(config.tools.convert_timeout(), Duration::from_secs(120));
        assert_eq!(config.frame, FrameBox { width: 1280, height: 480 });
        assert_eq!(config.limits, EncodingLimits::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(TomlConfigAdapter::parse("[frame]\nwidth = \"wide\"\n").is_err());
        assert!(TomlConfigAdapter::parse("[unknown]\nkey = 1\n").is_err());

        let tiny = TomlConfigAdapter::parse("[frame]\nwidth = 1\n").unwrap();
        assert!(matches!(tiny.validate(), Err(WebvidError::Config { .. })));

        let no_limit = TomlConfigAdapter::parse("[limits]\nmax_video_bitrate_kbps = 0\n").unwrap();
        assert!(no_limit.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = TomlConfigAdapter::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, WebvidError::Config { .. }));
    }
}
