//! Objects module
//!
//! This module defines the blob-store collaborator interface: uploads are
//! handed over as `(key, data, content type, metadata)` and the backend
//! answers with a download URL for the stored object.
//!
//! Object keys are caller-chosen, slash-separated paths. [`validate_object_key`]
//! is the shared key check every backend applies before storing anything.

pub mod types;

use self::types::ObjectMetadata;
use crate::error::MukStorageError;

/// Maximum allowed length of an object key in bytes
pub const MAX_OBJECT_KEY_LENGTH: usize = 1024;

/// Validate an object key.
///
/// Rejects empty and oversized keys, path traversal (`..`, leading `/`,
/// empty segments, backslashes) and any character outside the allowed set
/// (ASCII alphanumerics, `-`, `_`, `.`, `/`).
pub fn validate_object_key(key: &str) -> Result<(), MukStorageError> {
    if key.is_empty() {
        return Err(MukStorageError::InvalidKey("key is empty".to_string()));
    }

    if key.len() > MAX_OBJECT_KEY_LENGTH {
        return Err(MukStorageError::InvalidKey(format!(
            "key length {} exceeds maximum {}",
            key.len(),
            MAX_OBJECT_KEY_LENGTH
        )));
    }

    if key.contains("..") || key.starts_with('/') || key.contains("//") || key.contains('\\') {
        return Err(MukStorageError::InvalidKey(
            "path traversal detected".to_string(),
        ));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '/')
    {
        return Err(MukStorageError::InvalidKey(
            "invalid characters in key".to_string(),
        ));
    }

    Ok(())
}

/// Storage trait for the objects module
pub trait ObjectStorage {
    /// Store an object under `key` and return its download URL.
    ///
    /// Keys must satisfy [`validate_object_key`]. Storing to an existing key
    /// replaces the previous object, matching hosted blob-store semantics.
    ///
    /// # Returns
    ///
    /// The download URL issued by the backend for the stored object.
    fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> Result<String, MukStorageError>;

    /// Check whether an object exists under `key`.
    fn object_exists(&self, key: &str) -> Result<bool, MukStorageError>;
}
