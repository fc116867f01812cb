//! Output location policy: where converted files land.

use crate::error::CoreResult;

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Folder name prefix used when the user gives no output directory.
pub const DEFAULT_OUTPUT_PREFIX: &str = "Converted";

/// Computes the output directory for a run.
///
/// A user-supplied directory is used verbatim. Otherwise a timestamped
/// `Converted_<YYYY-MM-DD_HH-MM-SS>` folder under the working directory is
/// synthesized. Timestamp granularity is seconds; two runs starting in the
/// same second share the directory, which is safe because output file names
/// are derived from their sources and disambiguated per run.
///
/// This only computes the path. Nothing is created until
/// [`ensure_output_dir`] runs, so a run that queues no jobs leaves no
/// directory behind.
#[must_use]
pub fn resolve_output_dir(user: Option<&Path>, now: DateTime<Local>) -> PathBuf {
    match user {
        Some(dir) => dir.to_path_buf(),
        None => PathBuf::from(format!(
            "{}_{}",
            DEFAULT_OUTPUT_PREFIX,
            now.format("%Y-%m-%d_%H-%M-%S")
        )),
    }
}

/// Creates the output directory, parents included. Reuse of an existing
/// directory is allowed.
pub fn ensure_output_dir(dir: &Path) -> CoreResult<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}
