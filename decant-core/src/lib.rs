//! Core library for converting iOS media files to widely supported formats.
//!
//! HEIC/HEIF images are decoded via libheif and re-encoded as PNG; MOV/M4V
//! videos are handed to an external ffmpeg process with a fixed H.264/AAC
//! parameter set. This crate contributes the glue: file classification and
//! discovery, output naming policy, and batch orchestration. All actual
//! transcoding is delegated.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use decant_core::{plan_jobs, convert_batch, CoreConfig};
//! use decant_core::outdir::{ensure_output_dir, resolve_output_dir};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::default();
//! config.validate().unwrap();
//!
//! let scanned = decant_core::find_convertible_files(&PathBuf::from("/photos"), true).unwrap();
//! let output_dir = resolve_output_dir(None, chrono::Local::now());
//! let plan = plan_jobs(&[], &scanned, &output_dir);
//! ensure_output_dir(&output_dir).unwrap();
//!
//! let results = convert_batch(&config, plan.jobs, &|result| {
//!     println!("done: {}", result.job.source.display());
//! });
//! ```

pub mod classify;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod outdir;
pub mod processing;
pub mod utils;

// Re-exports for the public API
pub use classify::{classify, MediaKind};
pub use config::CoreConfig;
pub use discovery::find_convertible_files;
pub use error::{CoreError, CoreResult};
pub use external::{heif_runtime_version, verify_dependencies, DependencyStatus};
pub use processing::{
    convert_batch, plan_jobs, BatchSummary, ConversionJob, ConversionResult, ConversionStats,
    JobPlan,
};
pub use utils::{display_name, format_bytes, format_duration};
