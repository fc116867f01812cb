//! Interactions with external collaborators: the ffmpeg executable and the
//! linked libheif library.
//!
//! The video path shells out to ffmpeg; the image path links libheif
//! directly. Both are surfaced through [`verify_dependencies`] so `--check`
//! can report availability without touching any input files.

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

pub mod ffmpeg;

pub use ffmpeg::{run_transcode, transcode_args};

/// Name of the external transcoding executable.
pub const FFMPEG: &str = "ffmpeg";

/// Version of the libheif library the binary is linked against, as
/// `major.minor.patch`.
#[must_use]
pub fn heif_runtime_version() -> String {
    let lib_heif = libheif_rs::LibHeif::new();
    let [major, minor, patch] = lib_heif.version();
    format!("{major}.{minor}.{patch}")
}

/// Checks that an external command is present and executable by running it
/// with `-version`.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found");
            Err(CoreError::DependencyMissing(cmd_name.to_string()))
        }
        Err(e) => Err(CoreError::CommandStart {
            tool: cmd_name.to_string(),
            source: e,
        }),
    }
}

/// Availability and detail for one external dependency.
#[derive(Debug)]
pub struct DependencyStatus {
    pub name: &'static str,
    pub purpose: &'static str,
    pub available: bool,
    pub detail: Option<String>,
}

/// Probes every external dependency decant relies on.
///
/// libheif is linked into the binary, so the image path cannot be missing at
/// runtime; querying its runtime version confirms it resolved. ffmpeg is
/// probed by running `ffmpeg -version`.
#[must_use]
pub fn verify_dependencies() -> Vec<DependencyStatus> {
    let heif = DependencyStatus {
        name: "libheif",
        purpose: "HEIC/HEIF image decoding",
        available: true,
        detail: Some(format!("linked, version {}", heif_runtime_version())),
    };

    let ffmpeg = match check_dependency(FFMPEG) {
        Ok(()) => DependencyStatus {
            name: FFMPEG,
            purpose: "MOV/M4V video transcoding",
            available: true,
            detail: None,
        },
        Err(e) => DependencyStatus {
            name: FFMPEG,
            purpose: "MOV/M4V video transcoding",
            available: false,
            detail: Some(e.to_string()),
        },
    };

    vec![heif, ffmpeg]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dependency_missing_command() {
        let err = check_dependency("decant-no-such-tool-xyz").unwrap_err();
        assert!(matches!(err, CoreError::DependencyMissing(_)));
    }

    #[test]
    fn test_verify_dependencies_always_reports_both() {
        let statuses = verify_dependencies();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].name, "libheif");
        assert!(statuses[0].available);
        assert_eq!(statuses[1].name, "ffmpeg");
    }

    #[test]
    fn test_heif_runtime_version_is_semver_like() {
        let version = heif_runtime_version();
        let parts: Vec<&str> = version.split('.').collect();
        assert_eq!(parts.len(), 3, "unexpected version format: {version}");
        assert!(parts.iter().all(|p| p.parse::<u8>().is_ok()));
    }

    #[test]
    fn test_libheif_status_reports_linked_version() {
        let statuses = verify_dependencies();
        let detail = statuses[0].detail.as_deref().unwrap_or_default();
        assert!(detail.contains(&heif_runtime_version()));
    }
}
