//! MUK errors

use muk_storage_traits::MukStorageError;

use crate::normalizer::NormalizeError;
use crate::upload::types::UploadFailure;

/// MUK error
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Image normalization error
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    /// Storage error
    #[error(transparent)]
    Storage(#[from] MukStorageError),
    /// Filename is empty
    #[error("filename cannot be empty")]
    EmptyFilename,
    /// Filename is too long
    #[error("filename length {length} exceeds maximum {max_length}")]
    FilenameTooLong {
        /// The actual filename length
        length: usize,
        /// The maximum allowed filename length
        max_length: usize,
    },
    /// Filename contains path separators or control characters
    #[error("filename contains invalid characters")]
    InvalidFilename,
    /// Owner id is empty or not key-safe
    #[error("invalid owner id: {0}")]
    InvalidOwnerId(String),
    /// Listing draft failed validation
    #[error("invalid listing draft: {0}")]
    InvalidDraft(String),
    /// One or more listing images failed to process.
    ///
    /// Files are processed independently; this collects every failure so the
    /// caller can surface them per file.
    #[error("one or more listing images failed to process")]
    ImageUploads {
        /// The per-file failures, in input order
        failures: Vec<UploadFailure>,
    },
    /// Random number generation failed
    #[error("random generator unavailable: {0}")]
    Random(String),
}
