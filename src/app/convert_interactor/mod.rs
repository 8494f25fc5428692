// Convert interactor - Runs planned conversion jobs in order

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::app::batch_walker::{BatchPlan, FilePlan};
use crate::domain::model::*;
use crate::engine::CommandBuilder;
use crate::error::{WebvidError, WebvidResult};
use crate::planner::GeometryPlanner;
use crate::ports::{FsPort, ProcessPort};
use crate::probe::VideoInspector;
use crate::utils::Utils;

/// Interactor for the batch conversion use case
pub struct ConvertInteractor {
    process: Arc<dyn ProcessPort>,
    fs: Arc<dyn FsPort>,
    inspector: VideoInspector,
    planner: GeometryPlanner,
    builder: CommandBuilder,
}

impl ConvertInteractor {
    /// Create new convert interactor with injected ports
    pub fn new(
        process: Arc<dyn ProcessPort>,
        fs: Arc<dyn FsPort>,
        inspector: VideoInspector,
        planner: GeometryPlanner,
        builder: CommandBuilder,
    ) -> Self {
        Self {
            process,
            fs,
            inspector,
            planner,
            builder,
        }
    }

    /// Run every job of the plan, one at a time, in plan order
    pub async fn run(&self, plan: BatchPlan) -> RunReport {
        let started = Instant::now();
        let mut report = RunReport {
            outcomes: Vec::new(),
            errors: plan.errors,
        };

        let total = plan.files.len();
        for (index, file) in plan.files.into_iter().enumerate() {
            info!(
                "Converting {} of {}: {}",
                index + 1,
                total,
                file.input_path.display()
            );
            report.outcomes.extend(file.resolved.iter().cloned());
            if file.jobs.is_empty() {
                debug!("Nothing to do for {}", file.input_path.display());
                continue;
            }

            let outcomes = self.convert_file(&file).await;
            report.outcomes.extend(outcomes);
        }

        info!(
            "Finished in {}: {} converted, {} skipped, {} failed, {} dry-run",
            Utils::format_duration(started.elapsed()),
            report.converted(),
            report.skipped(),
            report.failed(),
            report.planned()
        );
        for message in &report.errors {
            error!("{}", message);
        }
        report
    }

    /// Inspect once, then run every format of one file
    async fn convert_file(&self, file: &FilePlan) -> Vec<JobOutcome> {
        let prepared = self.prepare(file).await;
        let (spec, geometry) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                error!("Skipping {}: {}", file.input_path.display(), e);
                return file
                    .jobs
                    .iter()
                    .map(|job| outcome(job, JobStatus::Failed(e.to_string())))
                    .collect();
            }
        };

        let mut outcomes = Vec::with_capacity(file.jobs.len());
        for job in &file.jobs {
            let status = match self.convert_job(job, &spec, &geometry).await {
                Ok(status) => status,
                Err(e) => {
                    error!("{}", e);
                    JobStatus::Failed(e.to_string())
                }
            };
            outcomes.push(outcome(job, status));
        }
        outcomes
    }

    async fn prepare(&self, file: &FilePlan) -> WebvidResult<(VideoSpec, TargetGeometry)> {
        let spec = self.inspector.inspect(&file.input_path).await?;
        let geometry = self.planner.plan(spec.width, spec.height)?;
        debug!(
            "Fitting {}x{} into {} as {}",
            spec.width,
            spec.height,
            self.planner.frame(),
            geometry.filter_expression()
        );

        let dry_run = file.jobs.iter().any(|job| job.dry_run);
        if !dry_run {
            self.fs.create_directory(&file.output_dir).await?;
        }
        Ok((spec, geometry))
    }

    async fn convert_job(
        &self,
        job: &ConversionJob,
        spec: &VideoSpec,
        geometry: &TargetGeometry,
    ) -> WebvidResult<JobStatus> {
        let command = self.builder.build(job, spec, geometry);

        if job.dry_run {
            if let Some(backup) = &job.backup_path {
                info!(
                    "Would back up {} to {}",
                    job.output_path.display(),
                    backup.display()
                );
            }
            info!("Would run: {}", command);
            return Ok(JobStatus::Planned(command.to_string()));
        }

        info!("Creating {}", job.output_path.display());
        let staging = job.staging_path();
        let output = match self.process.invoke(&command).await {
            Ok(output) if output.success() => output,
            Ok(output) => {
                self.discard(&staging).await;
                return Err(conversion_error(job, output.failure_summary()));
            }
            Err(e) => {
                self.discard(&staging).await;
                return Err(conversion_error(job, e.to_string()));
            }
        };
        debug!("Transcoder output: {}", output.stderr.trim());

        // The existing output may be this job's own source, so it is only
        // moved aside once the transcoder is done reading it.
        if let Some(backup) = &job.backup_path {
            if let Err(e) = self.back_up(job, backup).await {
                self.discard(&staging).await;
                return Err(e);
            }
        }
        self.fs.move_file(&staging, &job.output_path).await?;
        Ok(JobStatus::Converted)
    }

    async fn back_up(&self, job: &ConversionJob, backup: &std::path::Path) -> WebvidResult<()> {
        if self.fs.file_exists(backup).await? {
            debug!("Removing stale backup {}", backup.display());
            self.fs.delete_file(backup).await?;
        }
        info!(
            "Backing up {} to {}",
            job.output_path.display(),
            backup.display()
        );
        self.fs.move_file(&job.output_path, backup).await
    }

    /// Remove a partial staging file, if the transcoder left one
    async fn discard(&self, staging: &std::path::Path) {
        match self.fs.file_exists(staging).await {
            Ok(true) => {
                if let Err(e) = self.fs.delete_file(staging).await {
                    warn!("Could not remove {}: {}", staging.display(), e);
                }
            }
            Ok(false) => {}
            Err(e) => warn!("Could not check {}: {}", staging.display(), e),
        }
    }
}

fn outcome(job: &ConversionJob, status: JobStatus) -> JobOutcome {
    JobOutcome {
        input_path: job.input_path.clone(),
        output_path: job.output_path.clone(),
        format: job.format,
        status,
    }
}

fn conversion_error(job: &ConversionJob, message: String) -> WebvidError {
    WebvidError::Conversion {
        path: job.input_path.clone(),
        format: job.format.to_string(),
        message,
    }
}
