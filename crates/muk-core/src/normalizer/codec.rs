//! Codec capability interface and the default software implementation
//!
//! The search algorithm only needs three raster operations: decode bytes,
//! resample to a target size, and encode at a quality setting. They are
//! grouped behind [`ImageCodec`] so the search is portable across codec
//! backends (software, GPU-accelerated, or platform-native).

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};

use crate::normalizer::types::NormalizeError;

/// Raster operations the normalization search is built on.
///
/// Implementations must be deterministic: identical inputs produce identical
/// outputs, byte for byte. The search relies on this for reproducible
/// results.
pub trait ImageCodec {
    /// Decoded pixel raster
    type Raster;

    /// Decode input bytes into a raster.
    ///
    /// # Errors
    /// * `Decode` - If the bytes are not a decodable image
    fn decode(&self, data: &[u8]) -> Result<Self::Raster, NormalizeError>;

    /// Pixel dimensions of a raster as `(width, height)`
    fn dimensions(&self, raster: &Self::Raster) -> (u32, u32);

    /// Resample a raster to exactly `width` x `height` pixels
    fn resample(&self, raster: &Self::Raster, width: u32, height: u32) -> Self::Raster;

    /// Encode a raster as JPEG at `quality` (1-100).
    ///
    /// # Errors
    /// * `Encode` - If the encoder fails
    fn encode(&self, raster: &Self::Raster, quality: u8) -> Result<Vec<u8>, NormalizeError>;
}

/// Default software codec backed by the `image` crate.
///
/// Decoding bakes the EXIF orientation into the raster, so the normalized
/// output displays correctly even though re-encoding drops the metadata.
/// Resampling uses Lanczos3; encoding converts to RGB8 before the JPEG
/// encoder runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterCodec;

impl ImageCodec for RasterCodec {
    type Raster = DynamicImage;

    fn decode(&self, data: &[u8]) -> Result<Self::Raster, NormalizeError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| NormalizeError::Decode {
                reason: format!("failed to read image: {}", e),
            })?;

        let img = reader.decode().map_err(|e| NormalizeError::Decode {
            reason: format!("failed to decode image: {}", e),
        })?;

        Ok(apply_exif_orientation(data, img))
    }

    fn dimensions(&self, raster: &Self::Raster) -> (u32, u32) {
        (raster.width(), raster.height())
    }

    fn resample(&self, raster: &Self::Raster, width: u32, height: u32) -> Self::Raster {
        raster.resize_exact(width, height, image::imageops::FilterType::Lanczos3)
    }

    fn encode(&self, raster: &Self::Raster, quality: u8) -> Result<Vec<u8>, NormalizeError> {
        let mut buf = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buf, quality);

        raster
            .to_rgb8()
            .write_with_encoder(encoder)
            .map_err(|e| NormalizeError::Encode {
                reason: format!("JPEG encode failed: {}", e),
            })?;

        Ok(buf.into_inner())
    }
}

/// Apply the EXIF orientation transform to a decoded image.
///
/// Reads the orientation tag from the original bytes and applies the
/// matching rotation and/or flip. Images without EXIF data, or with an
/// unreadable tag, are returned unchanged.
///
/// EXIF orientation values:
/// 1 = Normal
/// 2 = Flip horizontal
/// 3 = Rotate 180°
/// 4 = Flip vertical
/// 5 = Flip horizontal + Rotate 270° CW
/// 6 = Rotate 90° CW
/// 7 = Flip horizontal + Rotate 90° CW
/// 8 = Rotate 270° CW
fn apply_exif_orientation(data: &[u8], img: DynamicImage) -> DynamicImage {
    let exif_reader = match Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif) => exif,
        Err(_) => return img, // No EXIF data or couldn't read it - return as-is
    };

    let orientation = match exif_reader.get_field(Tag::Orientation, In::PRIMARY) {
        Some(field) => match field.value.get_uint(0) {
            Some(val) => val,
            None => return img,
        },
        None => return img,
    };

    match orientation {
        1 => img,
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate270().fliph(),
        6 => img.rotate90(),
        7 => img.rotate90().fliph(),
        8 => img.rotate270(),
        _ => img, // Unknown orientation value - return as-is
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb};

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128u8])
        });
        let mut data = Vec::new();
        img.write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
            .unwrap();
        data
    }

    #[test]
    fn test_decode_valid_png() {
        let codec = RasterCodec;
        let raster = codec.decode(&png_bytes(40, 20)).unwrap();
        assert_eq!(codec.dimensions(&raster), (40, 20));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let codec = RasterCodec;
        let result = codec.decode(b"this is a text file renamed to .jpg");
        assert!(matches!(result, Err(NormalizeError::Decode { .. })));
    }

    #[test]
    fn test_resample_changes_dimensions() {
        let codec = RasterCodec;
        let raster = codec.decode(&png_bytes(100, 50)).unwrap();
        let resized = codec.resample(&raster, 10, 5);
        assert_eq!(codec.dimensions(&resized), (10, 5));
    }

    #[test]
    fn test_encode_produces_jpeg() {
        let codec = RasterCodec;
        let raster = codec.decode(&png_bytes(10, 10)).unwrap();
        let data = codec.encode(&raster, 80).unwrap();

        assert!(!data.is_empty());
        // JPEG SOI marker
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_lower_quality_is_not_larger() {
        let codec = RasterCodec;
        // Noisy-ish gradient so quality actually affects size
        let img = ImageBuffer::from_fn(256, 256, |x, y| {
            Rgb([
                ((x * 7 + y * 3) % 256) as u8,
                ((x * 13) % 256) as u8,
                ((y * 11) % 256) as u8,
            ])
        });
        let mut data = Vec::new();
        img.write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
            .unwrap();

        let raster = codec.decode(&data).unwrap();
        let high = codec.encode(&raster, 80).unwrap();
        let low = codec.encode(&raster, 40).unwrap();
        assert!(low.len() <= high.len());
    }

    #[test]
    fn test_encode_is_deterministic() {
        let codec = RasterCodec;
        let raster = codec.decode(&png_bytes(64, 64)).unwrap();
        let a = codec.encode(&raster, 70).unwrap();
        let b = codec.encode(&raster, 70).unwrap();
        assert_eq!(a, b);
    }
}
