//! Error types for MUK storage operations

use thiserror::Error;

/// Error type for MUK storage operations.
///
/// This error type is shared by all storage backends, enabling unified error
/// handling across object-store and listing-store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MukStorageError {
    /// Database operation failed
    #[error("database error: {0}")]
    Database(String),

    /// Serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Requested item was not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Object key is malformed
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    /// Object exceeds the backend's size limit
    #[error("object size {size} exceeds maximum allowed size {max_size}")]
    ObjectTooLarge {
        /// The actual object size in bytes
        size: usize,
        /// The maximum allowed object size in bytes
        max_size: usize,
    },

    /// Listing record failed backend validation
    #[error("invalid listing: {0}")]
    InvalidListing(String),

    /// Other error
    #[error("error: {0}")]
    Other(String),
}
