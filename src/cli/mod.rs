//! CLI module for WebVid
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

pub mod args;
pub mod commands;

pub use args::{ConvertRequest, InputSource};

/// WebVid batch web video converter
///
/// Converts a single video or a whole directory tree into web-ready FLV, Ogg,
/// MP4 and WebM files, letterboxed into a fixed frame.
#[derive(Parser, Debug)]
#[command(name = "webvid")]
#[command(about = "WebVid - Batch conversion of videos into web formats")]
#[command(version)]
#[command(long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["input_dir", "input_file"])))]
pub struct Cli {
    /// Root directory of videos to convert
    #[arg(short = 'i', long)]
    pub input_dir: Option<PathBuf>,

    /// Root directory for converted output, mirroring the input structure
    #[arg(short = 't', long)]
    pub output_dir: Option<PathBuf>,

    /// Prefix added to every output file name
    #[arg(short = 'p', long)]
    pub prefix: Option<String>,

    /// Single video file to convert
    #[arg(short = 'f', long, alias = "file")]
    pub input_file: Option<PathBuf>,

    /// Print the conversion commands without running them
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Skip outputs that already exist
    #[arg(short = 'e', long)]
    pub exists: bool,

    /// Rename existing outputs to <name>.bak before overwriting
    #[arg(short = 'b', long)]
    pub backup: bool,

    /// Logging level (quiet, error, warn, info, debug)
    #[arg(short = 'v', long, default_value = "info")]
    pub verbosity: String,

    /// Append log output to this file instead of standard error
    #[arg(short = 'g', long)]
    pub logfile: Option<PathBuf>,

    /// Output formats (flv, ogg, mp4, webm); defaults to all four
    #[arg(short = 'm', long = "format", value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Configuration file (defaults to ./webvid.toml when present)
    #[arg(long, env = "WEBVID_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from([
            "webvid", "-i", "videos", "-t", "out", "-p", "web_", "-d", "-e", "-m", "mp4,webm",
            "-v", "debug",
        ])
        .unwrap();

        assert_eq!(cli.input_dir, Some(PathBuf::from("videos")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.prefix.as_deref(), Some("web_"));
        assert!(cli.dry_run && cli.exists && !cli.backup);
        assert_eq!(cli.formats, vec!["mp4", "webm"]);
        assert_eq!(cli.verbosity, "debug");
    }

    #[test]
    fn test_source_is_required_and_exclusive() {
        assert!(Cli::try_parse_from(["webvid", "-d"]).is_err());
        assert!(Cli::try_parse_from(["webvid", "-i", "videos", "-f", "clip.mov"]).is_err());
        assert!(Cli::try_parse_from(["webvid", "--file", "clip.mov"]).is_ok());
    }
}
