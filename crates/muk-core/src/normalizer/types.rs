//! Shared types and constants for the normalization pipeline

use std::fmt;

/// Hard upper bound on normalized output size in bytes (200 KiB)
pub const DEFAULT_MAX_BLOB_BYTES: usize = 200 * 1024;

/// Width cap applied by the initial downscale factor; originals are never upscaled
pub const MAX_WIDTH: u32 = 1920;

/// Multiplicative decay applied to the scale factor between outer-loop iterations
pub const SCALE_DECAY: f64 = 0.85;

/// Scale floor; the outer loop stops once the factor drops to or below this.
/// A final forced attempt is still made exactly at this scale before failing.
pub const MIN_SCALE: f64 = 0.3;

/// First quality tried for each scale (encoder 1-100 scale)
pub const QUALITY_START: u8 = 80;

/// Lowest quality tried
pub const QUALITY_FLOOR: u8 = 40;

/// Step between quality ladder rungs
pub const QUALITY_STEP: u8 = 10;

/// Media type of every normalized blob
pub const NORMALIZED_CONTENT_TYPE: &str = "image/jpeg";

/// Maximum total pixels allowed in an input image (50 million pixels)
/// This prevents decompression bombs. At 50M pixels with 4 bytes per pixel (RGBA),
/// this allows ~200MB of decoded image data, which is reasonable for high-res images
/// but protects against malicious images that could exhaust memory.
pub const MAX_IMAGE_PIXELS: u64 = 50_000_000;

/// Maximum memory allowed for decoded input images in MB (256MB)
/// This is a hard limit on memory allocation to prevent OOM from decompression bombs.
pub const MAX_IMAGE_MEMORY_MB: u64 = 256;

/// Options for the normalization search
///
/// All fields have defaults matching the documented pipeline: a 200 KiB
/// budget, a 1920 px width cap, and the shared decompression-bomb guards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    /// Hard upper bound on output size in bytes
    pub max_bytes: usize,
    /// Width cap applied by the initial downscale factor
    pub max_width: u32,
    /// Maximum total pixels allowed in an input image
    pub max_pixels: u64,
    /// Maximum estimated decode memory in MB
    pub max_memory_mb: u64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BLOB_BYTES,
            max_width: MAX_WIDTH,
            max_pixels: MAX_IMAGE_PIXELS,
            max_memory_mb: MAX_IMAGE_MEMORY_MB,
        }
    }
}

impl NormalizeOptions {
    /// Create options with a custom byte budget and default guards
    pub fn with_budget(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            ..Default::default()
        }
    }
}

/// One trial (scale, quality) combination evaluated during the search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodingCandidate {
    /// Resample factor applied to the source raster dimensions
    pub scale: f64,
    /// JPEG quality on the encoder's 1-100 scale
    pub quality: u8,
}

impl fmt::Display for EncodingCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scale {:.4} quality {}", self.scale, self.quality)
    }
}

/// The normalizer's output: a JPEG blob guaranteed to fit the byte budget
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBlob {
    /// The encoded image bytes
    pub data: Vec<u8>,
    /// Declared media type; always [`NORMALIZED_CONTENT_TYPE`]
    pub content_type: &'static str,
    /// Output raster width in pixels
    pub width: u32,
    /// Output raster height in pixels
    pub height: u32,
    /// The winning candidate the blob was encoded with
    pub candidate: EncodingCandidate,
    /// SHA-256 hash of `data`
    pub content_hash: [u8; 32],
}

impl NormalizedBlob {
    /// Size of the encoded blob in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the blob is empty (never the case for a successful encode)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Errors that can occur during image normalization
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// Input could not be decoded as an image. Non-retryable: the bytes are
    /// not an image the pipeline understands.
    #[error("image decode failed: {reason}")]
    Decode {
        /// The decoder's failure reason
        reason: String,
    },

    /// Input has too many pixels (decompression bomb protection)
    #[error("image has {total_pixels} pixels, exceeding maximum {max_pixels}")]
    TooManyPixels {
        /// Total number of pixels
        total_pixels: u64,
        /// Maximum allowed pixels
        max_pixels: u64,
    },

    /// Input would require too much memory to decode (decompression bomb protection)
    #[error("image would require {estimated_mb}MB to decode, exceeding maximum {max_mb}MB")]
    MemoryTooLarge {
        /// Estimated memory requirement in MB
        estimated_mb: u64,
        /// Maximum allowed memory in MB
        max_mb: u64,
    },

    /// The encoder failed on a candidate. This is a codec defect, not a
    /// search outcome; the search never converts it into exhaustion.
    #[error("image encode failed: {reason}")]
    Encode {
        /// The encoder's failure reason
        reason: String,
    },

    /// No candidate in the full search space met the byte budget
    #[error("image exceeds {max_bytes} bytes even at minimum scale and quality")]
    CompressionExhausted {
        /// The configured byte budget that could not be met
        max_bytes: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_options_default() {
        let options = NormalizeOptions::default();
        assert_eq!(options.max_bytes, DEFAULT_MAX_BLOB_BYTES);
        assert_eq!(options.max_bytes, 204_800);
        assert_eq!(options.max_width, 1920);
        assert_eq!(options.max_pixels, MAX_IMAGE_PIXELS);
    }

    #[test]
    fn test_normalize_options_with_budget() {
        let options = NormalizeOptions::with_budget(50_000);
        assert_eq!(options.max_bytes, 50_000);
        assert_eq!(options.max_width, MAX_WIDTH);
    }

    #[test]
    fn test_candidate_display() {
        let candidate = EncodingCandidate {
            scale: 0.85,
            quality: 70,
        };
        assert_eq!(candidate.to_string(), "scale 0.8500 quality 70");
    }

    #[test]
    fn test_normalize_error_display() {
        let err = NormalizeError::Decode {
            reason: "bad magic".to_string(),
        };
        assert_eq!(err.to_string(), "image decode failed: bad magic");

        let err = NormalizeError::CompressionExhausted { max_bytes: 204_800 };
        assert_eq!(
            err.to_string(),
            "image exceeds 204800 bytes even at minimum scale and quality"
        );
    }
}
