//! Job driver: the Extract → Transform → Load state machine.
//!
//! A [`JobDriver`] walks one job through its phases in order, narrating each
//! boundary into the progress log and emitting `tracing` spans for
//! diagnostics. Any phase error moves the job to [`JobState::Failed`],
//! appends a failure line, and surfaces the error to the caller.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info_span;

use etl_ingest::{DirectorySource, RecordSource};
use etl_model::RecordSet;
use etl_output::{WriteOptions, load};
use etl_transform::{apply_rules, rounding_precision};

use crate::config::JobConfig;
use crate::progress::ProgressLog;

/// Where the driver is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Extracting,
    Transforming,
    Loading,
    Done,
    Failed,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    /// Rows produced by the extract phase.
    pub rows_extracted: usize,
    /// Rows written to each sink (equal to `rows_extracted`; transforms are
    /// row-preserving).
    pub rows_loaded: usize,
    /// Number of sinks written.
    pub sinks_written: usize,
    /// Whether sink writes were skipped.
    pub dry_run: bool,
}

/// Drives one job through extract, transform, and load.
pub struct JobDriver {
    config: JobConfig,
    progress: ProgressLog,
    state: JobState,
}

impl JobDriver {
    pub fn new(config: JobConfig) -> Self {
        let progress = ProgressLog::new(config.log_path.clone());
        Self {
            config,
            progress,
            state: JobState::Idle,
        }
    }

    /// Current phase.
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Run the job against its configured source directory.
    pub fn run(&mut self, dry_run: bool) -> Result<JobOutcome> {
        let source = DirectorySource::new(self.config.source_dir.clone(), self.config.schema());
        self.run_with_source(&source, dry_run)
    }

    /// Run the job against an arbitrary record source.
    ///
    /// This is the seam for non-directory extractors; the rest of the
    /// pipeline is unchanged.
    pub fn run_with_source(
        &mut self,
        source: &dyn RecordSource,
        dry_run: bool,
    ) -> Result<JobOutcome> {
        self.progress.append("ETL job started")?;
        let started = Instant::now();

        let result = self.run_phases(source, dry_run);
        match &result {
            Ok(outcome) => {
                self.state = JobState::Done;
                self.progress.append("ETL job ended")?;
                tracing::info!(
                    job = %self.config.name,
                    rows = outcome.rows_loaded,
                    sinks = outcome.sinks_written,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "job finished"
                );
            }
            Err(e) => {
                self.state = JobState::Failed;
                // The failure line is best-effort; the original error wins.
                let _ = self.progress.append(&format!("ETL job failed: {e:#}"));
                tracing::error!(job = %self.config.name, error = %format!("{e:#}"), "job failed");
            }
        }
        result
    }

    fn run_phases(&mut self, source: &dyn RecordSource, dry_run: bool) -> Result<JobOutcome> {
        let set = self.extract(source)?;
        let set = self.transform(set)?;
        let rows = set.len();
        let sinks_written = self.load_phase(&set, dry_run)?;

        Ok(JobOutcome {
            rows_extracted: rows,
            rows_loaded: rows,
            sinks_written,
            dry_run,
        })
    }

    fn extract(&mut self, source: &dyn RecordSource) -> Result<RecordSet> {
        self.state = JobState::Extracting;
        self.progress.append("Extract phase started")?;
        let span = info_span!("extract", job = %self.config.name, source = %source.describe());
        let _guard = span.enter();
        let started = Instant::now();

        let set = source
            .fetch()
            .with_context(|| format!("extract from {}", source.describe()))?;

        tracing::info!(
            rows = set.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "extract phase complete"
        );
        self.progress.append("Extract phase ended")?;
        Ok(set)
    }

    fn transform(&mut self, mut set: RecordSet) -> Result<RecordSet> {
        self.state = JobState::Transforming;
        self.progress.append("Transform phase started")?;
        let span = info_span!("transform", job = %self.config.name);
        let _guard = span.enter();
        let started = Instant::now();

        let rules = self.config.rules();
        apply_rules(&rules, &mut set).context("apply transform rules")?;

        tracing::info!(
            rules = rules.len(),
            rows = set.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "transform phase complete"
        );
        self.progress.append("Transform phase ended")?;
        Ok(set)
    }

    fn load_phase(&mut self, set: &RecordSet, dry_run: bool) -> Result<usize> {
        self.state = JobState::Loading;
        self.progress.append("Load phase started")?;
        let span = info_span!("load", job = %self.config.name);
        let _guard = span.enter();
        let started = Instant::now();

        let targets = self.config.sink_targets();
        if dry_run {
            tracing::info!(sinks = targets.len(), "dry run, sink writes skipped");
            self.progress.append("Load phase ended")?;
            return Ok(0);
        }

        let options = WriteOptions {
            precision: rounding_precision(&self.config.rules()),
        };
        load(set, &targets, &options).context("write sinks")?;

        tracing::info!(
            sinks = targets.len(),
            rows = set.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "load phase complete"
        );
        self.progress.append("Load phase ended")?;
        Ok(targets.len())
    }
}
