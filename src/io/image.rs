//! Loading source images and saving rendered mosaics

use crate::io::configuration::OUTPUT_PREFIX;
use crate::io::error::{MosaicError, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};

/// Decode an image file into an RGBA pixel buffer
///
/// # Errors
///
/// Returns `SourceLoad` if:
/// - The file at the given path cannot be opened or read
/// - The file is not a supported image format
/// - The file contents are corrupt
pub fn load_source<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| MosaicError::SourceLoad {
        path: path_buf,
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Encode and write a rendered image, creating missing parent directories
///
/// The output format follows the path's extension. Formats without an alpha
/// channel receive the color channels only.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn save_output<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::CreateOutputDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let saved = if matches!(ImageFormat::from_path(path), Ok(ImageFormat::Jpeg)) {
        DynamicImage::ImageRgba8(image.clone()).to_rgb8().save(path)
    } else {
        image.save(path)
    };

    saved.map_err(|e| MosaicError::OutputSave {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Output location for an input: same directory, file name prefixed
pub fn output_path_for(input_path: &Path) -> PathBuf {
    let file_name = input_path.file_name().unwrap_or_default();
    let output_name = format!("{OUTPUT_PREFIX}{}", file_name.to_string_lossy());
    input_path.with_file_name(output_name)
}

/// Whether the path carries the prefix given to rendered outputs
pub fn is_output_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(OUTPUT_PREFIX))
}

/// Whether the path's extension names a format that can be decoded
pub fn is_supported_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}
