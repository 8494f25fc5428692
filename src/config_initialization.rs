//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::adapters::{AppConfig, TomlConfigAdapter};
use crate::error::WebvidResult;

/// Environment variable overriding the transcoder executable
pub const ENV_FFMPEG: &str = "WEBVID_FFMPEG";
/// Environment variable overriding the inspection executable
pub const ENV_MEDIAINFO: &str = "WEBVID_MEDIAINFO";

/// Build the configuration following precedence: Env > File > Defaults.
///
/// `--config` only selects the file; no flag overrides individual settings.
pub fn initialize_configuration(explicit: Option<&Path>) -> WebvidResult<AppConfig> {
    resolve_configuration(
        explicit,
        TomlConfigAdapter::default_config_path(),
        |name| std::env::var(name).ok(),
    )
}

/// Same as [`initialize_configuration`] with the file fallback and the
/// environment lookup injected
pub fn resolve_configuration(
    explicit: Option<&Path>,
    fallback: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> WebvidResult<AppConfig> {
    // Step 1: defaults, or the config file when one is given or present
    let mut config = match explicit.map(Path::to_path_buf).or(fallback) {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            TomlConfigAdapter::load(&path)?
        }
        None => {
            debug!("No configuration file, using defaults");
            AppConfig::default()
        }
    };

    // Step 2: environment overrides
    if let Some(ffmpeg) = env(ENV_FFMPEG).filter(|v| !v.is_empty()) {
        debug!("Found environment override: {} = {}", ENV_FFMPEG, ffmpeg);
        config.tools.ffmpeg = ffmpeg;
    }
    if let Some(mediainfo) = env(ENV_MEDIAINFO).filter(|v| !v.is_empty()) {
        debug!("Found environment override: {} = {}", ENV_MEDIAINFO, mediainfo);
        config.tools.mediainfo = mediainfo;
    }

    config.validate()?;
    Ok(config)
}
