//! Maps file extensions to a conversion kind.

use std::path::Path;

/// Supported image extensions (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: [&str; 2] = ["heic", "heif"];

/// Supported video extensions (lowercase, without the dot).
pub const VIDEO_EXTENSIONS: [&str; 2] = ["mov", "m4v"];

/// The kind of conversion a file needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// HEIC/HEIF image, converted to PNG.
    Image,
    /// MOV/M4V video, converted to MP4.
    Video,
}

impl MediaKind {
    /// Extension of the converted output file, without the dot.
    #[must_use]
    pub fn output_extension(self) -> &'static str {
        match self {
            MediaKind::Image => "png",
            MediaKind::Video => "mp4",
        }
    }
}

/// Classifies a path by its extension, case-insensitively.
///
/// Returns `None` for anything that is not a supported iOS media format.
/// Unsupported is a valid classification, not an error; this function is
/// total and has no side effects.
#[must_use]
pub fn classify(path: &Path) -> Option<MediaKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}
