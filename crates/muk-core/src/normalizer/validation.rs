//! Pre-decode input validation
//!
//! A header-only probe reads the claimed dimensions before any pixel data is
//! decoded, so decompression bombs are rejected without allocating for them.
//! The same limits are re-checked against the decoded raster, since headers
//! can lie.

use std::io::Cursor;

use image::ImageReader;

use crate::normalizer::types::{NormalizeError, NormalizeOptions};

/// Read image dimensions from the header without decoding pixel data.
pub(crate) fn preflight_dimensions(data: &[u8]) -> Result<(u32, u32), NormalizeError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| NormalizeError::Decode {
            reason: format!("failed to read image header: {}", e),
        })?;

    reader.into_dimensions().map_err(|e| NormalizeError::Decode {
        reason: format!("failed to read image dimensions: {}", e),
    })
}

/// Validate raster dimensions against the pixel-count and memory guards.
pub(crate) fn validate_raster_limits(
    width: u32,
    height: u32,
    options: &NormalizeOptions,
) -> Result<(), NormalizeError> {
    let total_pixels = width as u64 * height as u64;

    if total_pixels > options.max_pixels {
        return Err(NormalizeError::TooManyPixels {
            total_pixels,
            max_pixels: options.max_pixels,
        });
    }

    // Ceiling division so the estimate never understates the allocation
    let bytes_per_pixel = 4u64; // RGBA
    let total_bytes = total_pixels * bytes_per_pixel;
    let estimated_mb = total_bytes.div_ceil(1024 * 1024);

    if estimated_mb > options.max_memory_mb {
        return Err(NormalizeError::MemoryTooLarge {
            estimated_mb,
            max_mb: options.max_memory_mb,
        });
    }

    Ok(())
}
