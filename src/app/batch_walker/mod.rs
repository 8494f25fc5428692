// Batch walker - Enumerates input videos and plans their conversion jobs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::domain::model::*;
use crate::domain::rules::{OutputDecision, OverwriteRules};
use crate::error::WebvidResult;
use crate::ports::FsPort;
use crate::utils::path::PathUtils;

/// Options shared by every planned job
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Root of the mirrored output tree; `None` writes next to each input
    pub output_root: Option<PathBuf>,
    /// Prepended to every output file name
    pub prefix: Option<String>,
    pub formats: Vec<OutputFormat>,
    pub overwrite_policy: OverwritePolicy,
    pub dry_run: bool,
}

/// Jobs for one input file, decided before anything runs
#[derive(Debug, Clone)]
pub struct FilePlan {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Pairs that still need the transcoder
    pub jobs: Vec<ConversionJob>,
    /// Pairs already settled at planning time (skipped or failed)
    pub resolved: Vec<JobOutcome>,
}

/// Every file plan of a run
#[derive(Debug, Clone, Default)]
pub struct BatchPlan {
    pub files: Vec<FilePlan>,
    /// Entries that could not be read while walking
    pub errors: Vec<String>,
}

/// Walks the input tree and resolves the overwrite policy per (file, format)
pub struct BatchWalker {
    fs: Arc<dyn FsPort>,
    options: WalkOptions,
}

impl BatchWalker {
    /// Create new batch walker
    pub fn new(fs: Arc<dyn FsPort>, options: WalkOptions) -> Self {
        Self { fs, options }
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Every regular file under `root`, sorted by name at each level
    pub fn enumerate(root: &Path) -> (Vec<PathBuf>, Vec<String>) {
        let mut files = Vec::new();
        let mut errors = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    errors.push(e.to_string());
                }
            }
        }

        (files, errors)
    }

    /// Plan every file under `root`
    pub async fn plan_directory(&self, root: &Path) -> BatchPlan {
        let (candidates, mut errors) = Self::enumerate(root);
        info!(
            "Found {} candidate videos under {}",
            candidates.len(),
            root.display()
        );

        let mut files = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.plan_file(root, &candidate).await {
                Ok(plan) => files.push(plan),
                Err(e) => {
                    warn!("Cannot plan {}: {}", candidate.display(), e);
                    errors.push(e.to_string());
                }
            }
        }

        BatchPlan { files, errors }
    }

    /// Plan a single file given on the command line
    pub async fn plan_single(&self, file: &Path) -> BatchPlan {
        let root = file.parent().unwrap_or_else(|| Path::new(""));
        match self.plan_file(root, file).await {
            Ok(plan) => BatchPlan {
                files: vec![plan],
                errors: Vec::new(),
            },
            Err(e) => BatchPlan {
                files: Vec::new(),
                errors: vec![e.to_string()],
            },
        }
    }

    /// Resolve output paths and the overwrite policy for one file
    pub async fn plan_file(&self, input_root: &Path, file: &Path) -> WebvidResult<FilePlan> {
        let output_dir =
            PathUtils::mirror_directory(input_root, self.options.output_root.as_deref(), file)?;

        let mut jobs = Vec::new();
        let mut resolved = Vec::new();
        for &format in &self.options.formats {
            let name = PathUtils::output_file_name(self.options.prefix.as_deref(), file, format)?;
            let output_path = output_dir.join(name);

            let exists = match self.fs.file_exists(&output_path).await {
                Ok(exists) => exists,
                Err(e) => {
                    warn!("Cannot check {}: {}", output_path.display(), e);
                    resolved.push(JobOutcome {
                        input_path: file.to_path_buf(),
                        output_path,
                        format,
                        status: JobStatus::Failed(e.to_string()),
                    });
                    continue;
                }
            };

            match OverwriteRules::decide(self.options.overwrite_policy, exists) {
                OutputDecision::Skip => {
                    info!("Skipping conversion of existing file {}", output_path.display());
                    resolved.push(JobOutcome {
                        input_path: file.to_path_buf(),
                        output_path,
                        format,
                        status: JobStatus::Skipped,
                    });
                }
                decision => {
                    let backup_path = (decision == OutputDecision::Backup)
                        .then(|| backup_path_for(&output_path));
                    debug!("Planned {} -> {}", file.display(), output_path.display());
                    jobs.push(ConversionJob {
                        input_path: file.to_path_buf(),
                        output_path,
                        format,
                        overwrite_policy: self.options.overwrite_policy,
                        dry_run: self.options.dry_run,
                        backup_path,
                    });
                }
            }
        }

        Ok(FilePlan {
            input_path: file.to_path_buf(),
            output_dir,
            jobs,
            resolved,
        })
    }
}
