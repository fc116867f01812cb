//! File discovery: finds convertible media files under a root directory.

use crate::classify::classify;
use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds convertible media files under `root`.
///
/// Only files whose extension classifies as a supported image or video kind
/// are returned. With `recursive` set, subdirectories are walked; otherwise
/// only the top level is scanned. Symlinks are followed, and walkdir's loop
/// detection keeps cyclic links from being traversed more than once; loop
/// entries are logged and skipped. Results are sorted so a given tree always
/// produces the same job order.
///
/// An empty result is not an error here. The caller decides whether the
/// overall input set (explicit files plus scan) is empty.
pub fn find_convertible_files(root: &Path, recursive: bool) -> CoreResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CoreError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut walker = WalkDir::new(root).follow_links(true);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && classify(entry.path()).is_some() {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                if let Some(ancestor) = err.loop_ancestor() {
                    log::warn!(
                        "Skipping symlink cycle back to '{}' while scanning",
                        ancestor.display()
                    );
                    continue;
                }
                return Err(err.into());
            }
        }
    }

    files.sort();
    Ok(files)
}
