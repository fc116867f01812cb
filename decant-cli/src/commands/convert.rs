//! The conversion run: resolve inputs, convert, summarize.

use crate::cli::Cli;
use crate::output;

use decant_core::outdir::{ensure_output_dir, resolve_output_dir};
use decant_core::{BatchSummary, CoreConfig, CoreError, CoreResult, JobPlan};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Runs a full conversion batch.
///
/// Setup errors (missing scan directory, empty input set, bad configuration)
/// propagate as `Err` and abort before any output directory is created.
/// Per-file failures are reported in the summary; the returned exit code is
/// 1 when any job failed, 0 otherwise.
pub fn run_convert(args: &Cli) -> CoreResult<i32> {
    let run_start = Instant::now();

    let config = CoreConfig {
        output_dir: args.output.clone(),
        recursive: args.recursive,
        jobs: args.jobs as usize,
        transcode_timeout: Duration::from_secs(args.timeout),
    };
    config.validate()?;
    log::debug!(
        "Resolved config: recursive={}, jobs={}, timeout={}s",
        config.recursive,
        config.jobs,
        config.transcode_timeout.as_secs()
    );

    if args.files.is_empty() && args.directory.is_none() {
        output::print_warning(
            "No files or directory specified; see --help. Use --check to verify dependencies.",
        );
        return Err(CoreError::NoInputFiles);
    }

    let scanned = match &args.directory {
        Some(dir) => {
            let found = decant_core::find_convertible_files(dir, config.recursive)?;
            output::print_info(
                "Found",
                format!("{} convertible file(s) in {}", found.len(), dir.display()),
            );
            found
        }
        None => Vec::new(),
    };

    let output_dir = resolve_output_dir(config.output_dir.as_deref(), chrono::Local::now());
    let JobPlan { jobs, skipped } = decant_core::plan_jobs(&args.files, &scanned, &output_dir);
    if jobs.is_empty() {
        return Err(CoreError::NoInputFiles);
    }
    ensure_output_dir(&output_dir)?;

    output::print_info("Output folder", output_dir.display());
    output::print_info("Converting", format!("{} file(s)", jobs.len()));

    let total = jobs.len();
    let done = AtomicUsize::new(0);
    let results = decant_core::convert_batch(&config, jobs, &|result| {
        let index = done.fetch_add(1, Ordering::SeqCst) + 1;
        output::print_job_result(index, total, result);
    });

    let summary = BatchSummary::new(results, skipped);
    output::print_summary(&summary, &output_dir, run_start.elapsed());

    Ok(if summary.failed() > 0 { 1 } else { 0 })
}
