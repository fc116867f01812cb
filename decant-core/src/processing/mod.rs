//! Batch orchestration: resolves the job list, computes destinations, and
//! converts each file, collecting one result per job.
//!
//! A job moves through Discovered -> Classified -> Converting ->
//! {Succeeded | Failed}. There are no automatic retries; a failed job is
//! recorded and the batch proceeds. Jobs never share mutable state, so the
//! parallel mode only needs a bounded pool and an ordered collect.

pub mod image;
pub mod video;

pub use image::convert_image;
pub use video::convert_video;

use crate::classify::{classify, MediaKind};
use crate::config::CoreConfig;
use crate::error::CoreError;

use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One file to convert. Immutable once planned.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub kind: MediaKind,
    /// Destination path, always directly under the run's output directory.
    pub dest: PathBuf,
}

/// Statistics for a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionStats {
    pub elapsed: Duration,
    pub input_size: u64,
    pub output_size: u64,
}

/// Outcome of one job.
#[derive(Debug)]
pub struct ConversionResult {
    pub job: ConversionJob,
    pub outcome: Result<ConversionStats, CoreError>,
}

impl ConversionResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// The planned job list plus the count of explicit inputs that were skipped
/// as unsupported.
#[derive(Debug)]
pub struct JobPlan {
    pub jobs: Vec<ConversionJob>,
    pub skipped: usize,
}

/// Aggregated results of a run.
#[derive(Debug)]
pub struct BatchSummary {
    pub results: Vec<ConversionResult>,
    pub skipped: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn new(results: Vec<ConversionResult>, skipped: usize) -> Self {
        Self { results, skipped }
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ConversionResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

/// Builds the job list from explicit file arguments plus a directory scan
/// result.
///
/// Inputs are deduplicated by resolved absolute path, preserving first-seen
/// order. Explicit files with unsupported extensions are counted as skipped;
/// scanned paths were already filtered by the classifier. Destination names
/// flatten into one output directory, so colliding stems are disambiguated
/// with a `_2`, `_3`, ... suffix in job order rather than silently
/// overwritten.
#[must_use]
pub fn plan_jobs(explicit: &[PathBuf], scanned: &[PathBuf], output_dir: &Path) -> JobPlan {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut used_names: HashSet<String> = HashSet::new();
    let mut jobs = Vec::new();
    let mut skipped = 0usize;

    for source in explicit.iter().chain(scanned.iter()) {
        let key = source
            .canonicalize()
            .unwrap_or_else(|_| source.to_path_buf());
        if !seen.insert(key) {
            log::debug!("Duplicate input ignored: {}", source.display());
            continue;
        }

        let Some(kind) = classify(source) else {
            log::warn!("Skipping unsupported file: {}", source.display());
            skipped += 1;
            continue;
        };

        let dest = allocate_dest(&mut used_names, output_dir, source, kind);
        jobs.push(ConversionJob {
            source: source.clone(),
            kind,
            dest,
        });
    }

    JobPlan { jobs, skipped }
}

/// Picks a free output file name for `source` within the run.
///
/// Names are reserved case-insensitively so the run also behaves on
/// case-insensitive filesystems.
fn allocate_dest(
    used_names: &mut HashSet<String>,
    output_dir: &Path,
    source: &Path,
    kind: MediaKind,
) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = kind.output_extension();

    let mut candidate = format!("{stem}.{ext}");
    let mut n = 2usize;
    while !used_names.insert(candidate.to_lowercase()) {
        candidate = format!("{stem}_{n}.{ext}");
        n += 1;
    }
    output_dir.join(candidate)
}

/// Converts every job, returning one result per job in job order.
///
/// With `config.jobs == 1` execution is sequential; otherwise jobs run on a
/// rayon pool bounded to that size. `on_result` fires as each job completes
/// (completion order); the returned vector is the single aggregation step
/// and always matches job order.
pub fn convert_batch(
    config: &CoreConfig,
    jobs: Vec<ConversionJob>,
    on_result: &(dyn Fn(&ConversionResult) + Sync),
) -> Vec<ConversionResult> {
    let timeout = config.transcode_timeout;

    if config.jobs > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .build()
        {
            Ok(pool) => {
                return pool.install(|| {
                    jobs.into_par_iter()
                        .map(|job| {
                            let outcome = convert_one(&job, timeout);
                            let result = ConversionResult { job, outcome };
                            on_result(&result);
                            result
                        })
                        .collect()
                });
            }
            Err(e) => {
                log::warn!("Failed to build worker pool ({e}); falling back to sequential");
            }
        }
    }

    jobs.into_iter()
        .map(|job| {
            let outcome = convert_one(&job, timeout);
            let result = ConversionResult { job, outcome };
            on_result(&result);
            result
        })
        .collect()
}

/// Converts a single job, dispatching on its kind.
fn convert_one(job: &ConversionJob, timeout: Duration) -> Result<ConversionStats, CoreError> {
    let start = Instant::now();

    if !job.source.is_file() {
        return Err(CoreError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("input file not found: {}", job.source.display()),
        )));
    }
    let input_size = fs::metadata(&job.source)?.len();

    log::info!(
        "Converting {} -> {}",
        job.source.display(),
        job.dest.display()
    );
    match job.kind {
        MediaKind::Image => image::convert_image(&job.source, &job.dest)?,
        MediaKind::Video => video::convert_video(&job.source, &job.dest, timeout)?,
    }

    let output_size = fs::metadata(&job.dest)?.len();
    Ok(ConversionStats {
        elapsed: start.elapsed(),
        input_size,
        output_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        File::create(path).expect("failed to create fixture file");
    }

    #[test]
    fn test_plan_deduplicates_by_resolved_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.heic");
        touch(&file);
        let out = dir.path().join("out");

        // Listed explicitly twice and found by the scan.
        let explicit = vec![file.clone(), file.clone()];
        let scanned = vec![file.clone()];
        let plan = plan_jobs(&explicit, &scanned, &out);

        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(plan.skipped, 0);
    }

    #[test]
    fn test_plan_skips_unsupported_explicit_files() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("a.heic");
        let bad = dir.path().join("b.jpg");
        touch(&good);
        touch(&bad);

        let plan = plan_jobs(&[good, bad], &[], &dir.path().join("out"));
        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(plan.skipped, 1);
    }

    #[test]
    fn test_plan_disambiguates_colliding_stems() {
        let dir = tempdir().unwrap();
        let sub_a = dir.path().join("a");
        let sub_b = dir.path().join("b");
        fs::create_dir_all(&sub_a).unwrap();
        fs::create_dir_all(&sub_b).unwrap();
        touch(&sub_a.join("IMG_0001.heic"));
        touch(&sub_b.join("IMG_0001.heic"));
        let out = dir.path().join("out");

        let plan = plan_jobs(
            &[sub_a.join("IMG_0001.heic"), sub_b.join("IMG_0001.heic")],
            &[],
            &out,
        );
        let names: Vec<_> = plan
            .jobs
            .iter()
            .map(|j| j.dest.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["IMG_0001.png", "IMG_0001_2.png"]);
    }

    #[test]
    fn test_plan_same_stem_different_kind_does_not_collide() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("IMG.heic"));
        touch(&dir.path().join("IMG.mov"));
        let out = dir.path().join("out");

        let plan = plan_jobs(
            &[dir.path().join("IMG.heic"), dir.path().join("IMG.mov")],
            &[],
            &out,
        );
        let names: Vec<_> = plan
            .jobs
            .iter()
            .map(|j| j.dest.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["IMG.png", "IMG.mp4"]);
    }

    #[test]
    fn test_destinations_live_under_output_dir() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.heic"));
        touch(&dir.path().join("b.mov"));
        let out = dir.path().join("out");

        let plan = plan_jobs(
            &[dir.path().join("a.heic"), dir.path().join("b.mov")],
            &[],
            &out,
        );
        assert!(plan.jobs.iter().all(|j| j.dest.parent() == Some(&*out)));
    }

    #[test]
    fn test_batch_partial_failure_does_not_abort() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();

        // Corrupt image (decode fails) followed by a missing video (fails
        // before ffmpeg is even spawned).
        let corrupt = dir.path().join("corrupt.heic");
        fs::write(&corrupt, b"garbage").unwrap();
        let missing = dir.path().join("missing.mov");

        let plan = plan_jobs(&[corrupt.clone(), missing.clone()], &[], &out);
        assert_eq!(plan.jobs.len(), 2);

        let config = CoreConfig::default();
        let results = convert_batch(&config, plan.jobs, &|_| {});

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.is_success()));
        // Result order matches job order.
        assert!(results[0].job.source.ends_with("corrupt.heic"));
        assert!(results[1].job.source.ends_with("missing.mov"));

        let summary = BatchSummary::new(results, 0);
        assert_eq!(summary.succeeded(), 0);
        assert_eq!(summary.failed(), 2);
    }

    #[test]
    fn test_parallel_batch_preserves_result_order() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();

        let sources: Vec<PathBuf> = (0..4)
            .map(|i| dir.path().join(format!("missing_{i}.heic")))
            .collect();
        let plan = plan_jobs(&sources, &[], &out);

        let config = CoreConfig {
            jobs: 2,
            ..CoreConfig::default()
        };
        let results = convert_batch(&config, plan.jobs, &|_| {});

        assert_eq!(results.len(), 4);
        for (i, result) in results.iter().enumerate() {
            assert!(result.job.source.ends_with(format!("missing_{i}.heic")));
        }
    }

    #[test]
    fn test_result_callback_fires_per_job() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();

        let plan = plan_jobs(
            &[dir.path().join("x.heic"), dir.path().join("y.mov")],
            &[],
            &out,
        );
        let seen = AtomicUsize::new(0);
        let _ = convert_batch(&CoreConfig::default(), plan.jobs, &|_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
