//! Image upload normalizer
//!
//! Given an arbitrary user-selected image file, produce a re-encoded JPEG
//! blob guaranteed not to exceed a byte budget, suitable for handing to a
//! blob-storage collaborator. The pipeline is decode, then an iterative
//! rescale/re-encode search, then size validation; a call either yields one
//! conforming blob or fails outright.

pub mod codec;
pub mod search;
pub mod types;
pub mod validation;

// Re-export commonly used types and functions
pub use codec::{ImageCodec, RasterCodec};
pub use search::ImageNormalizer;
pub use types::{
    DEFAULT_MAX_BLOB_BYTES, EncodingCandidate, NORMALIZED_CONTENT_TYPE, NormalizeError,
    NormalizeOptions, NormalizedBlob,
};
