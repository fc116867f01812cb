//! MOV/M4V to MP4 conversion via the external ffmpeg process.

use crate::error::{CoreError, CoreResult};
use crate::external;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Converts one MOV/M4V file to an MP4 at `dest`.
///
/// ffmpeg writes to a `.part` sibling of `dest`, which is renamed into
/// place on success and removed on failure, so no partial output survives a
/// failed or killed transcode.
pub fn convert_video(source: &Path, dest: &Path, timeout: Duration) -> CoreResult<()> {
    let part = part_path(dest);

    match external::run_transcode(source, &part, timeout) {
        Ok(()) => fs::rename(&part, dest).map_err(|e| {
            let _ = fs::remove_file(&part);
            CoreError::Write {
                path: dest.to_path_buf(),
                source: e,
            }
        }),
        Err(e) => {
            let _ = fs::remove_file(&part);
            Err(e)
        }
    }
}

/// In-progress output path: `clip.mp4` -> `clip.mp4.part`.
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_part_path_appends_suffix() {
        assert_eq!(
            part_path(Path::new("/out/clip.mp4")),
            PathBuf::from("/out/clip.mp4.part")
        );
    }

    #[test]
    fn test_failed_transcode_leaves_no_partial_output() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("broken.mov");
        fs::write(&source, b"definitely not a quicktime file").unwrap();
        let dest = dir.path().join("broken.mp4");

        // Fails either because ffmpeg is absent or because it rejects the
        // input; both ways the destination must stay clean.
        let result = convert_video(&source, &dest, Duration::from_secs(30));
        assert!(result.is_err());
        assert!(!dest.exists());
        assert!(!part_path(&dest).exists());
    }
}
