//! Core configuration for a conversion run.

use crate::error::{CoreError, CoreResult};

use std::path::PathBuf;
use std::time::Duration;

/// Default number of concurrent conversions. Sequential execution is the
/// conservative default; transcoding is CPU- and I/O-heavy.
pub const DEFAULT_JOBS: usize = 1;

/// Default wall-clock timeout for a single ffmpeg transcode. Guards against
/// indefinite hangs on malformed input.
pub const DEFAULT_TRANSCODE_TIMEOUT_SECS: u64 = 3600;

/// Configuration for a batch conversion run.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Output directory override. `None` synthesizes a timestamped folder.
    pub output_dir: Option<PathBuf>,
    /// Recurse into subdirectories when scanning a directory.
    pub recursive: bool,
    /// Worker pool size; 1 means sequential execution.
    pub jobs: usize,
    /// Per-file wall-clock limit for the external transcoder.
    pub transcode_timeout: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            recursive: true,
            jobs: DEFAULT_JOBS,
            transcode_timeout: Duration::from_secs(DEFAULT_TRANSCODE_TIMEOUT_SECS),
        }
    }
}

impl CoreConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.jobs == 0 {
            return Err(CoreError::Config("jobs must be at least 1".to_string()));
        }
        if self.transcode_timeout.is_zero() {
            return Err(CoreError::Config(
                "transcode timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.jobs, 1);
        assert!(config.recursive);
    }

    #[test]
    fn test_zero_jobs_rejected() {
        let config = CoreConfig {
            jobs: 0,
            ..CoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = CoreConfig {
            transcode_timeout: Duration::ZERO,
            ..CoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
