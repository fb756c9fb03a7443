//! Storage key construction and filename validation
//!
//! Uploaded listing images are stored under
//! `listings/<owner_id>/<generated_id>_<sanitized_stem>.jpg`. The generated
//! id combines a millisecond timestamp, the file's position in the batch,
//! and random bytes, so sibling uploads in one submission never collide.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Error;

/// Maximum filename length accepted from user input
pub const MAX_FILENAME_LENGTH: usize = 210;

/// Key namespace all listing images are stored under
pub const LISTING_KEY_NAMESPACE: &str = "listings";

/// Bytes of entropy in a generated image id (hex-encoded)
const IMAGE_ID_RANDOM_BYTES: usize = 4;

/// Validate a user-supplied filename.
///
/// # Errors
/// * `EmptyFilename` - If the filename is empty
/// * `FilenameTooLong` - If the filename exceeds [`MAX_FILENAME_LENGTH`]
/// * `InvalidFilename` - If the filename contains path separators or control characters
pub fn validate_filename(filename: &str) -> Result<(), Error> {
    if filename.is_empty() {
        return Err(Error::EmptyFilename);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(Error::FilenameTooLong {
            length: filename.len(),
            max_length: MAX_FILENAME_LENGTH,
        });
    }

    if filename.contains('/') || filename.contains('\\') || filename.chars().any(|c| c.is_control())
    {
        return Err(Error::InvalidFilename);
    }

    Ok(())
}

/// Validate an owner id for use as a key segment.
///
/// Owner ids come from the identity provider and are embedded verbatim in
/// storage keys, so only key-safe characters are accepted.
pub fn validate_owner_id(owner_id: &str) -> Result<(), Error> {
    if owner_id.is_empty() {
        return Err(Error::InvalidOwnerId("owner id is empty".to_string()));
    }

    if !owner_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidOwnerId(format!(
            "owner id contains characters not allowed in storage keys: {}",
            owner_id
        )));
    }

    Ok(())
}

/// Strip the final extension and replace key-unsafe characters with `_`.
///
/// Falls back to `image` when nothing usable remains (e.g. a bare
/// extension like `.png`).
pub(crate) fn sanitized_stem(filename: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(idx) => &filename[..idx],
        None => filename,
    };

    let sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "image".to_string()
    } else {
        sanitized
    }
}

/// Generate a unique id for one image in an upload batch.
///
/// Format: `<unix_millis>_<index>_<random hex>`.
pub(crate) fn generate_image_id(index: usize) -> Result<String, Error> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_millis();

    let mut random = [0u8; IMAGE_ID_RANDOM_BYTES];
    getrandom::fill(&mut random).map_err(|e| Error::Random(e.to_string()))?;

    Ok(format!("{}_{}_{}", millis, index, hex::encode(random)))
}

/// Build the storage key for one listing image.
pub(crate) fn listing_image_key(owner_id: &str, image_id: &str, original_name: &str) -> String {
    format!(
        "{}/{}/{}_{}.jpg",
        LISTING_KEY_NAMESPACE,
        owner_id,
        image_id,
        sanitized_stem(original_name)
    )
}

#[cfg(test)]
mod tests {
    use muk_storage_traits::objects::validate_object_key;

    use super::*;

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("test.jpg").is_ok());
        assert!(validate_filename("my-photo.png").is_ok());

        assert!(matches!(validate_filename(""), Err(Error::EmptyFilename)));

        let long = "a".repeat(MAX_FILENAME_LENGTH + 1);
        assert!(matches!(
            validate_filename(&long),
            Err(Error::FilenameTooLong { .. })
        ));

        let max = "a".repeat(MAX_FILENAME_LENGTH);
        assert!(validate_filename(&max).is_ok());

        assert!(matches!(
            validate_filename("path/to/file.jpg"),
            Err(Error::InvalidFilename)
        ));
        assert!(matches!(
            validate_filename("path\\to\\file.jpg"),
            Err(Error::InvalidFilename)
        ));
        assert!(matches!(
            validate_filename("evil\u{0007}.jpg"),
            Err(Error::InvalidFilename)
        ));
    }

    #[test]
    fn test_validate_owner_id() {
        assert!(validate_owner_id("u1").is_ok());
        assert!(validate_owner_id("a-b_c123").is_ok());

        assert!(matches!(
            validate_owner_id(""),
            Err(Error::InvalidOwnerId(_))
        ));
        assert!(matches!(
            validate_owner_id("u 1"),
            Err(Error::InvalidOwnerId(_))
        ));
        assert!(matches!(
            validate_owner_id("u/1"),
            Err(Error::InvalidOwnerId(_))
        ));
    }

    #[test]
    fn test_sanitized_stem() {
        assert_eq!(sanitized_stem("photo.png"), "photo");
        assert_eq!(sanitized_stem("my file (1).jpeg"), "my_file__1_");
        assert_eq!(sanitized_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(sanitized_stem("no-extension"), "no-extension");
        assert_eq!(sanitized_stem(".png"), "image");
    }

    #[test]
    fn test_generate_image_id_format() {
        let id = generate_image_id(2).unwrap();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].parse::<u128>().is_ok());
        assert_eq!(parts[1], "2");
        assert_eq!(parts[2].len(), IMAGE_ID_RANDOM_BYTES * 2);
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = generate_image_id(0).unwrap();
        let b = generate_image_id(0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_listing_image_key_is_valid_object_key() {
        let id = generate_image_id(0).unwrap();
        let key = listing_image_key("seller-1", &id, "vacation photo.png");

        assert!(key.starts_with("listings/seller-1/"));
        assert!(key.ends_with("_vacation_photo.jpg"));
        assert!(validate_object_key(&key).is_ok());
    }
}
