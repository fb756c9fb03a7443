//! `ObjectStorage` implementation for memory storage

use muk_storage_traits::error::MukStorageError;
use muk_storage_traits::objects::types::{ObjectMetadata, StoredObject};
use muk_storage_traits::objects::{ObjectStorage, validate_object_key};
use sha2::{Digest, Sha256};

use crate::{MukMemoryStorage, now_secs};

/// Number of hex characters of the content hash used in issued URLs
const URL_TOKEN_LENGTH: usize = 16;

/// Build the download URL for a stored object.
///
/// The token is derived from the object's content hash, standing in for the
/// random access tokens a hosted blob store embeds in its download URLs.
/// Deriving it from content keeps URL issuance deterministic for tests.
fn download_url(key: &str, data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let token = hex::encode(&digest[..URL_TOKEN_LENGTH / 2]);
    format!("memory://{key}?token={token}")
}

impl ObjectStorage for MukMemoryStorage {
    fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> Result<String, MukStorageError> {
        validate_object_key(key)?;

        if data.len() > self.limits.max_object_bytes {
            return Err(MukStorageError::ObjectTooLarge {
                size: data.len(),
                max_size: self.limits.max_object_bytes,
            });
        }

        if metadata.custom.len() > self.limits.max_metadata_entries {
            return Err(MukStorageError::Other(format!(
                "metadata entry count {} exceeds maximum {}",
                metadata.custom.len(),
                self.limits.max_metadata_entries
            )));
        }

        let object = StoredObject {
            key: key.to_string(),
            data: data.to_vec(),
            content_type: content_type.to_string(),
            metadata: metadata.clone(),
            created_at: now_secs(),
        };

        // LruCache::put evicts the least recently stored object when full.
        self.objects.write().put(key.to_string(), object);

        Ok(download_url(key, data))
    }

    fn object_exists(&self, key: &str) -> Result<bool, MukStorageError> {
        Ok(self.objects.read().contains(key))
    }
}

#[cfg(test)]
mod tests {
    use muk_storage_traits::objects::types::ObjectMetadata;

    use super::*;
    use crate::ValidationLimits;

    #[test]
    fn test_put_object_stores_and_issues_url() {
        let storage = MukMemoryStorage::default();
        let metadata = ObjectMetadata::with_original_name("photo.png");

        let url = storage
            .put_object("listings/u1/a.jpg", &[1, 2, 3], "image/jpeg", &metadata)
            .unwrap();
        assert!(url.starts_with("memory://listings/u1/a.jpg?token="));

        let stored = storage.get_object("listings/u1/a.jpg").unwrap();
        assert_eq!(stored.data, vec![1, 2, 3]);
        assert_eq!(stored.content_type, "image/jpeg");
        assert_eq!(stored.metadata.original_name(), Some("photo.png"));
        assert!(stored.created_at > 0);
    }

    #[test]
    fn test_put_object_url_is_deterministic_for_same_content() {
        let storage = MukMemoryStorage::default();
        let metadata = ObjectMetadata::new();

        let url_a = storage
            .put_object("listings/u1/a.jpg", &[9; 32], "image/jpeg", &metadata)
            .unwrap();
        let url_b = storage
            .put_object("listings/u1/a.jpg", &[9; 32], "image/jpeg", &metadata)
            .unwrap();
        assert_eq!(url_a, url_b);

        let url_c = storage
            .put_object("listings/u1/a.jpg", &[8; 32], "image/jpeg", &metadata)
            .unwrap();
        assert_ne!(url_a, url_c);
    }

    #[test]
    fn test_put_object_rejects_oversized_object() {
        let storage =
            MukMemoryStorage::with_limits(ValidationLimits::default().with_max_object_bytes(8));

        let result = storage.put_object(
            "listings/u1/a.jpg",
            &[0u8; 9],
            "image/jpeg",
            &ObjectMetadata::new(),
        );
        assert!(matches!(
            result,
            Err(MukStorageError::ObjectTooLarge {
                size: 9,
                max_size: 8
            })
        ));
        assert_eq!(storage.object_count(), 0);
    }

    #[test]
    fn test_put_object_rejects_oversized_metadata() {
        let storage =
            MukMemoryStorage::with_limits(ValidationLimits::default().with_max_metadata_entries(1));

        let mut metadata = ObjectMetadata::with_original_name("a.jpg");
        metadata
            .custom
            .insert("extra".to_string(), "value".to_string());

        let result = storage.put_object("listings/u1/a.jpg", &[0u8; 4], "image/jpeg", &metadata);
        assert!(matches!(result, Err(MukStorageError::Other(_))));
    }

    #[test]
    fn test_object_cache_evicts_oldest_when_full() {
        let storage = MukMemoryStorage::with_limits(ValidationLimits::default().with_max_objects(2));
        let metadata = ObjectMetadata::new();

        storage
            .put_object("listings/u1/a.jpg", &[1], "image/jpeg", &metadata)
            .unwrap();
        storage
            .put_object("listings/u1/b.jpg", &[2], "image/jpeg", &metadata)
            .unwrap();
        storage
            .put_object("listings/u1/c.jpg", &[3], "image/jpeg", &metadata)
            .unwrap();

        assert_eq!(storage.object_count(), 2);
        assert!(!storage.object_exists("listings/u1/a.jpg").unwrap());
        assert!(storage.object_exists("listings/u1/b.jpg").unwrap());
        assert!(storage.object_exists("listings/u1/c.jpg").unwrap());
    }
}
