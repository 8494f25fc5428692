//! Validated command-line request

use std::path::PathBuf;

use crate::app::WalkOptions;
use crate::cli::Cli;
use crate::domain::model::{OutputFormat, OverwritePolicy};
use crate::error::{WebvidError, WebvidResult};
use crate::utils::logging::{LogLevel, LoggingConfig};

/// Where the videos come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Every file under a directory tree
    Directory(PathBuf),
    /// One file
    File(PathBuf),
}

/// Arguments after validation, ready to plan a run
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub source: InputSource,
    pub output_root: Option<PathBuf>,
    pub prefix: Option<String>,
    pub formats: Vec<OutputFormat>,
    pub overwrite_policy: OverwritePolicy,
    pub dry_run: bool,
    pub logging: LoggingConfig,
}

impl ConvertRequest {
    /// Validate parsed arguments; every failure is an argument error
    pub fn from_cli(cli: &Cli) -> WebvidResult<Self> {
        let source = match (&cli.input_dir, &cli.input_file) {
            (Some(dir), None) => {
                if !dir.is_dir() {
                    return Err(WebvidError::argument(format!(
                        "Input directory does not exist: {}",
                        dir.display()
                    )));
                }
                InputSource::Directory(dir.clone())
            }
            (None, Some(file)) => {
                if !file.is_file() {
                    return Err(WebvidError::argument(format!(
                        "Input file does not exist: {}",
                        file.display()
                    )));
                }
                InputSource::File(file.clone())
            }
            _ => {
                return Err(WebvidError::argument(
                    "exactly one of --input-dir or --input-file is required",
                ))
            }
        };

        let prefix = cli.prefix.clone().filter(|p| !p.is_empty());
        if prefix.as_deref().is_some_and(|p| p.contains(std::path::is_separator)) {
            return Err(WebvidError::argument("prefix cannot contain a path separator"));
        }

        Ok(Self {
            source,
            output_root: cli.output_dir.clone(),
            prefix,
            formats: OutputFormat::parse_list(&cli.formats)?,
            overwrite_policy: OverwritePolicy::from_flags(cli.exists, cli.backup),
            dry_run: cli.dry_run,
            logging: LoggingConfig::new(LogLevel::parse(&cli.verbosity)?, cli.logfile.clone()),
        })
    }

    /// Options handed to the batch walker
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            output_root: self.output_root.clone(),
            prefix: self.prefix.clone(),
            formats: self.formats.clone(),
            overwrite_policy: self.overwrite_policy,
            dry_run: self.dry_run,
        }
    }
}
