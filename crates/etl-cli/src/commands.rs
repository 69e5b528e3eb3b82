//! Subcommand implementations.

use anyhow::{Context, Result};

use etl_ingest::source_inventory;

use crate::cli::{InspectArgs, RunArgs};
use crate::config::JobConfig;
use crate::driver::{JobDriver, JobOutcome};

/// Execute the `run` subcommand.
pub fn run_job(args: &RunArgs) -> Result<JobOutcome> {
    let config = JobConfig::load(&args.job)?;
    tracing::info!(
        job = %config.name,
        source_dir = %config.source_dir.display(),
        sinks = config.sinks.len(),
        dry_run = args.dry_run,
        "starting job"
    );
    let mut driver = JobDriver::new(config);
    driver.run(args.dry_run)
}

/// Execute the `inspect` subcommand: list the files a run would extract.
pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let config = JobConfig::load(&args.job)?;
    let inventory = source_inventory(&config.source_dir)
        .with_context(|| format!("scan {}", config.source_dir.display()))?;

    println!("job: {}", config.name);
    println!("source_dir: {}", config.source_dir.display());
    let mut total = 0usize;
    for (format, files) in &inventory {
        println!("{format}: {} file(s)", files.len());
        for path in files {
            println!("  {}", path.display());
        }
        total += files.len();
    }
    println!("total: {total} file(s)");
    Ok(())
}
