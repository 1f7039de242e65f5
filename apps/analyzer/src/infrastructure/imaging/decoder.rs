use crate::domain::analysis::{entity::ImageMetadata, errors::AnalysisError};
use chrono::{DateTime, Utc};
use image::{ImageError, ImageReader, RgbImage};
use std::io;
use std::path::Path;
use tracing::debug;

/// An image decoded once and shared by every pipeline of a request.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Pixels converted to 8-bit RGB
    pub pixels: RgbImage,
    pub metadata: ImageMetadata,
    /// Last modification time of the file
    pub modified: DateTime<Utc>,
}

/// Reads and decodes `path` into an RGB buffer plus its metadata.
///
/// # Errors
/// - `ImageNotFound` if nothing exists at `path`
/// - `ImageDecode` if the file exists but cannot be read or parsed as an image
pub fn decode_image(path: &Path) -> Result<DecodedImage, AnalysisError> {
    let decode_error = |source: ImageError| AnalysisError::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    let file_meta = std::fs::metadata(path).map_err(|e| metadata_error(path, e))?;
    if !file_meta.is_file() {
        return Err(AnalysisError::ImageNotFound(path.display().to_string()));
    }

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_error(ImageError::IoError(e)))?;
    let format = reader
        .format()
        .map(|f| format!("{:?}", f).to_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let image = reader.decode().map_err(decode_error)?;

    let metadata = ImageMetadata {
        width: image.width(),
        height: image.height(),
        channels: image.color().channel_count(),
        file_size: file_meta.len(),
        format,
    };
    debug!(
        "Decoded {} ({}x{}, {} channels, {})",
        path.display(),
        metadata.width,
        metadata.height,
        metadata.channels,
        metadata.format
    );

    let modified = file_meta
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    Ok(DecodedImage {
        pixels: image.to_rgb8(),
        metadata,
        modified,
    })
}

/// Only a missing path counts as not found; any other I/O failure on an
/// existing path is a processing error.
fn metadata_error(path: &Path, error: io::Error) -> AnalysisError {
    match error.kind() {
        io::ErrorKind::NotFound => AnalysisError::ImageNotFound(path.display().to_string()),
        _ => AnalysisError::ImageDecode {
            path: path.to_path_buf(),
            source: ImageError::IoError(error),
        },
    }
}
