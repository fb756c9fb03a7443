//! Candidate-ladder compression search
//!
//! The search walks (scale, quality) candidates with quality descending
//! inside scale descending, so the first candidate that fits the byte budget
//! is also the highest-quality, largest one that does. An input that already
//! fits at the first candidate is returned as-is modulo the re-encode; it is
//! never compressed further than the budget requires.

use sha2::{Digest, Sha256};

use crate::normalizer::codec::{ImageCodec, RasterCodec};
use crate::normalizer::types::{
    EncodingCandidate, MIN_SCALE, NORMALIZED_CONTENT_TYPE, NormalizeError, NormalizeOptions,
    NormalizedBlob, QUALITY_FLOOR, QUALITY_START, QUALITY_STEP, SCALE_DECAY,
};
use crate::normalizer::validation;

/// Compute the initial downscale factor.
///
/// Caps the output width at `max_width` and never upscales. For very wide
/// inputs this can land below [`MIN_SCALE`], in which case the ladder is
/// empty and only the forced final candidate is tried.
fn initial_scale(width: u32, max_width: u32) -> f64 {
    (max_width as f64 / width.max(1) as f64).min(1.0)
}

/// Apply a scale factor to raster dimensions, rounding and clamping to 1x1.
fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// The Image Upload Normalizer.
///
/// Re-encodes an arbitrary input image into a JPEG blob guaranteed not to
/// exceed a byte budget. Each call owns its decode and encode buffers and no
/// state is shared between calls, so independent normalizations may run
/// concurrently without synchronization.
#[derive(Debug, Clone)]
pub struct ImageNormalizer<C = RasterCodec> {
    codec: C,
    options: NormalizeOptions,
}

impl ImageNormalizer<RasterCodec> {
    /// Create a normalizer with the default codec and options
    pub fn new() -> Self {
        Self::with_options(NormalizeOptions::default())
    }

    /// Create a normalizer with the default codec and custom options
    pub fn with_options(options: NormalizeOptions) -> Self {
        Self {
            codec: RasterCodec,
            options,
        }
    }
}

impl Default for ImageNormalizer<RasterCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ImageNormalizer<C>
where
    C: ImageCodec,
{
    /// Create a normalizer with a custom codec backend
    pub fn with_codec(codec: C, options: NormalizeOptions) -> Self {
        Self { codec, options }
    }

    /// The options this normalizer runs with
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize an image to the configured byte budget.
    ///
    /// # Errors
    /// * `Decode` - If the input cannot be decoded as an image
    /// * `TooManyPixels` / `MemoryTooLarge` - If the input trips a
    ///   decompression-bomb guard
    /// * `CompressionExhausted` - If no candidate in the search space fits
    ///   the budget
    pub fn normalize(&self, data: &[u8]) -> Result<NormalizedBlob, NormalizeError> {
        self.normalize_with_budget(data, self.options.max_bytes)
    }

    /// Normalize an image to an explicit byte budget.
    ///
    /// Identical to [`Self::normalize`] but overrides the configured budget
    /// for this call only.
    pub fn normalize_with_budget(
        &self,
        data: &[u8],
        max_bytes: usize,
    ) -> Result<NormalizedBlob, NormalizeError> {
        let (header_width, header_height) = validation::preflight_dimensions(data)?;
        validation::validate_raster_limits(header_width, header_height, &self.options)?;

        let raster = self.codec.decode(data)?;
        let (width, height) = self.codec.dimensions(&raster);
        // Headers can lie; re-check the decoded raster.
        validation::validate_raster_limits(width, height, &self.options)?;

        let start = initial_scale(width, self.options.max_width);
        tracing::debug!(
            target: "muk_core::normalizer",
            width,
            height,
            initial_scale = start,
            max_bytes,
            "starting compression search"
        );

        let mut scale = start;
        while scale > MIN_SCALE {
            let mut quality = QUALITY_START;
            while quality >= QUALITY_FLOOR {
                let candidate = EncodingCandidate { scale, quality };
                if let Some(blob) =
                    self.try_candidate(&raster, width, height, candidate, max_bytes)?
                {
                    return Ok(blob);
                }
                quality -= QUALITY_STEP;
            }
            scale *= SCALE_DECAY;
        }

        // One forced attempt at the floor of both ladders before giving up
        let forced = EncodingCandidate {
            scale: MIN_SCALE,
            quality: QUALITY_FLOOR,
        };
        if let Some(blob) = self.try_candidate(&raster, width, height, forced, max_bytes)? {
            return Ok(blob);
        }

        tracing::debug!(
            target: "muk_core::normalizer",
            max_bytes,
            "compression search exhausted"
        );
        Err(NormalizeError::CompressionExhausted { max_bytes })
    }

    /// Evaluate one candidate: resample, encode, measure.
    ///
    /// Returns `Ok(Some(blob))` when the encoded size fits `max_bytes`,
    /// `Ok(None)` when it doesn't. Encoder failures propagate.
    fn try_candidate(
        &self,
        raster: &C::Raster,
        width: u32,
        height: u32,
        candidate: EncodingCandidate,
        max_bytes: usize,
    ) -> Result<Option<NormalizedBlob>, NormalizeError> {
        let (target_width, target_height) = scaled_dimensions(width, height, candidate.scale);

        let encoded = if (target_width, target_height) == (width, height) {
            self.codec.encode(raster, candidate.quality)?
        } else {
            let resampled = self.codec.resample(raster, target_width, target_height);
            self.codec.encode(&resampled, candidate.quality)?
        };

        tracing::trace!(
            target: "muk_core::normalizer",
            %candidate,
            bytes = encoded.len(),
            "evaluated candidate"
        );

        if encoded.len() > max_bytes {
            return Ok(None);
        }

        tracing::debug!(
            target: "muk_core::normalizer",
            %candidate,
            bytes = encoded.len(),
            max_bytes,
            "candidate accepted"
        );

        let content_hash: [u8; 32] = Sha256::digest(&encoded).into();
        Ok(Some(NormalizedBlob {
            data: encoded,
            content_type: NORMALIZED_CONTENT_TYPE,
            width: target_width,
            height: target_height,
            candidate,
            content_hash,
        }))
    }
}
