//! Command implementations

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::args::{ConvertRequest, InputSource};
use crate::cli::Cli;
use crate::config_initialization::initialize_configuration;
use crate::domain::model::RunReport;
use crate::utils::logging::init_logging;

/// Execute a conversion run
pub async fn convert(cli: Cli) -> Result<RunReport> {
    let request = ConvertRequest::from_cli(&cli)?;
    init_logging(&request.logging)?;

    info!("Starting WebVid conversion");
    debug!("Request: {:?}", request);

    let config = initialize_configuration(cli.config.as_deref())?;
    info!(
        "Using {} and {}, frame {}",
        config.tools.ffmpeg, config.tools.mediainfo, config.frame
    );

    let container = DefaultAppContainer::new(&config, request.logging.level);
    run(&container, &request).await
}

/// Plan and execute a validated request against a container
pub async fn run(container: &dyn AppContainer, request: &ConvertRequest) -> Result<RunReport> {
    let walker = container.batch_walker(request.walk_options());
    let plan = match &request.source {
        InputSource::Directory(root) => walker.plan_directory(root).await,
        InputSource::File(file) => walker.plan_single(file).await,
    };

    let report = container.convert_interactor().run(plan).await;

    if request.dry_run {
        print_planned_commands(&report).context("Failed to print dry-run commands")?;
    }
    Ok(report)
}

/// Dry-run commands go to standard output, one per line
fn print_planned_commands(report: &RunReport) -> std::io::Result<()> {
    use std::io::Write;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for command in report.planned_commands() {
        writeln!(out, "{}", command)?;
    }
    out.flush()
}
