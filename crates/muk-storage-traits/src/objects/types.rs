//! Types for the objects module

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata key under which the uploader records the user's original filename
pub const ORIGINAL_NAME_KEY: &str = "original_name";

/// Custom metadata attached to a stored object.
///
/// Mirrors the free-form key/value metadata hosted blob stores attach to an
/// upload. The upload workflow records the user's original filename here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Free-form key/value pairs stored alongside the object
    pub custom: BTreeMap<String, String>,
}

impl ObjectMetadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metadata carrying the user's original filename
    pub fn with_original_name(name: &str) -> Self {
        let mut custom = BTreeMap::new();
        custom.insert(ORIGINAL_NAME_KEY.to_string(), name.to_string());
        Self { custom }
    }

    /// The recorded original filename, if any
    pub fn original_name(&self) -> Option<&str> {
        self.custom.get(ORIGINAL_NAME_KEY).map(String::as_str)
    }
}

/// An object materialized by a storage backend for a put.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// The caller-chosen key the object is stored under
    pub key: String,
    /// The object's bytes
    pub data: Vec<u8>,
    /// Declared media type (e.g. `image/jpeg`)
    pub content_type: String,
    /// Custom metadata attached at upload time
    pub metadata: ObjectMetadata,
    /// Unix timestamp (seconds) the object was stored at
    pub created_at: u64,
}

impl StoredObject {
    /// Size of the stored object in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_metadata_original_name() {
        let metadata = ObjectMetadata::with_original_name("vacation photo.png");
        assert_eq!(metadata.original_name(), Some("vacation photo.png"));

        let empty = ObjectMetadata::new();
        assert_eq!(empty.original_name(), None);
    }

    #[test]
    fn test_object_metadata_serde_round_trip() {
        let metadata = ObjectMetadata::with_original_name("a.jpg");
        let json = serde_json::to_string(&metadata).unwrap();
        let back: ObjectMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(metadata, back);
    }

    #[test]
    fn test_stored_object_size() {
        let object = StoredObject {
            key: "listings/u1/a.jpg".to_string(),
            data: vec![0u8; 123],
            content_type: "image/jpeg".to_string(),
            metadata: ObjectMetadata::new(),
            created_at: 1_700_000_000,
        };
        assert_eq!(object.size(), 123);
    }
}
