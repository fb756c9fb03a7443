//! MUK Public Prelude
//!
//! This module provides the essential types that MUK users need to work with
//! the library. It only includes the core MUK types and storage traits -
//! storage backends (like `muk-memory-storage`) should be imported directly
//! by users.
//!
//! ## Usage
//!
//! ```rust
//! use muk_core::prelude::*;
//! use muk_memory_storage::MukMemoryStorage;
//!
//! let muk = MUK::new(MukMemoryStorage::default());
//! ```

// === Core MUK Types ===
/// MUK error type
pub use crate::Error;
/// The main MUK struct for normalization and upload operations
pub use crate::MUK;
/// MUK configuration
pub use crate::MukConfig;

// === Normalizer Types ===
/// The image normalizer and its codec seam
pub use crate::normalizer::{
    EncodingCandidate, ImageCodec, ImageNormalizer, NormalizeError, NormalizeOptions,
    NormalizedBlob, RasterCodec,
};

// === Upload Workflow Types ===
/// Upload workflow entry points and result types
pub use crate::upload::{
    ListingDraft, ListingImageFile, ListingUploadManager, PreparedImageUpload, UploadFailure,
    UploadedImage,
};

// === Storage Traits (users need these to provide storage implementations) ===
pub use muk_storage_traits::{Backend, MukStorageProvider};

// === Storage Type Aliases (convenient for users working with storage) ===
pub use muk_storage_traits::listings::types as listing_types;
pub use muk_storage_traits::objects::types as object_types;
