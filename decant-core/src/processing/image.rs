//! HEIC/HEIF to PNG conversion via libheif.

use crate::error::{CoreError, CoreResult};

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Converts one HEIC/HEIF file to a PNG at `dest`.
///
/// The source's alpha channel, when present, is preserved by decoding to
/// RGBA; opaque sources decode to RGB. The PNG is written to a temporary
/// file in the destination directory and renamed into place on success, so
/// a failure never leaves a partial output behind.
pub fn convert_image(source: &Path, dest: &Path) -> CoreResult<()> {
    let image = decode_heif(source)?;
    write_png(&image, dest)
}

fn decode_err(path: &Path, message: impl ToString) -> CoreError {
    CoreError::Decode {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Decodes the primary image of a HEIF container into a [`DynamicImage`].
fn decode_heif(source: &Path) -> CoreResult<DynamicImage> {
    let path_str = source
        .to_str()
        .ok_or_else(|| CoreError::PathError(format!("non UTF-8 path: {}", source.display())))?;

    let ctx = HeifContext::read_from_file(path_str).map_err(|e| decode_err(source, e))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| decode_err(source, e))?;
    let has_alpha = handle.has_alpha_channel();

    let lib_heif = LibHeif::new();
    let chroma = if has_alpha {
        RgbChroma::Rgba
    } else {
        RgbChroma::Rgb
    };
    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(chroma), None)
        .map_err(|e| decode_err(source, e))?;

    let width = decoded.width();
    let height = decoded.height();
    let planes = decoded.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| decode_err(source, "no interleaved pixel plane in decoded image"))?;

    // Rows are stride-padded; copy only the pixel bytes of each row.
    let channels: usize = if has_alpha { 4 } else { 3 };
    let row_bytes = width as usize * channels;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in plane.data.chunks(plane.stride).take(height as usize) {
        let row = row
            .get(..row_bytes)
            .ok_or_else(|| decode_err(source, "decoded plane shorter than declared row size"))?;
        pixels.extend_from_slice(row);
    }

    let image = if has_alpha {
        DynamicImage::ImageRgba8(
            RgbaImage::from_raw(width, height, pixels)
                .ok_or_else(|| decode_err(source, "decoded plane size mismatch"))?,
        )
    } else {
        DynamicImage::ImageRgb8(
            RgbImage::from_raw(width, height, pixels)
                .ok_or_else(|| decode_err(source, "decoded plane size mismatch"))?,
        )
    };
    Ok(image)
}

/// Encodes `image` as PNG at `dest` via a temporary file in the same
/// directory, renamed into place once fully written.
fn write_png(image: &DynamicImage, dest: &Path) -> CoreResult<()> {
    let write_err = |e: std::io::Error| CoreError::Write {
        path: dest.to_path_buf(),
        source: e,
    };

    let dir = dest
        .parent()
        .ok_or_else(|| CoreError::PathError(format!("no parent directory: {}", dest.display())))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| CoreError::Write {
                path: dest.to_path_buf(),
                source: std::io::Error::other(e.to_string()),
            })?;
        writer.flush().map_err(write_err)?;
    }
    // Rename within the same directory; the temp file cleans itself up if
    // anything above failed.
    tmp.persist(dest)
        .map_err(|e| write_err(e.error))
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_corrupt_input_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("garbage.heic");
        fs::write(&source, b"not a heif container at all").unwrap();
        let dest = dir.path().join("garbage.png");

        let err = convert_image(&source, &dest).unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
        // No partial output may be left behind.
        assert!(!dest.exists());
    }

    #[test]
    fn test_missing_input_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("absent.heic");
        let dest = dir.path().join("absent.png");

        let err = convert_image(&source, &dest).unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_write_png_creates_file_atomically() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.png");
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            2,
            image::Rgba([10, 20, 30, 128]),
        ));

        write_png(&image, &dest).unwrap();
        assert!(dest.is_file());

        // Round-trip through the PNG on disk preserves dimensions and alpha.
        let reloaded = image::open(&dest).unwrap();
        assert_eq!(reloaded.width(), 4);
        assert_eq!(reloaded.height(), 2);
        assert_eq!(reloaded.to_rgba8().get_pixel(0, 0).0[3], 128);

        // No stray temp files remain.
        let others: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path() != dest)
            .collect();
        assert!(others.is_empty());
    }
}
