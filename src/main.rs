//! WebVid batch web video converter
//!
//! Converts one video, or every video under a directory tree, into web
//! playback formats. Each output is scaled to fit a fixed frame and padded
//! (letterboxed or pillarboxed) to exactly fill it.
//!
//! # Features
//!
//! - FLV, Ogg, MP4 and WebM output, all four by default
//! - Mirrored output tree with an optional file name prefix
//! - Skip, back up or overwrite existing outputs
//! - Dry run printing the exact transcoder commands
//!
//! # Usage
//!
//! ```bash
//! webvid -i videos -t web -p web_ -m mp4,webm
//! webvid -f clip.mov --dry-run
//! webvid -i videos -t web --exists -v warn -g webvid.log
//! ```

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use webvid_cli::cli::{commands, Cli};
use webvid_cli::error::WebvidError;

/// Usage and configuration errors
const EXIT_USAGE: u8 = 2;
/// At least one job failed
const EXIT_FAILURE: u8 = 1;

/// Main entry point for the WebVid CLI application
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    match commands::convert(cli).await {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_FAILURE),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let usage = e
                .downcast_ref::<WebvidError>()
                .is_some_and(WebvidError::is_usage_error);
            if usage {
                eprintln!("{}", Cli::command().render_usage());
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
    }
}
