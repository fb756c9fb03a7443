//! Types for the upload workflow

use crate::error::Error;
use crate::normalizer::NormalizedBlob;

/// Maximum number of images accepted per listing; extra files are ignored
pub const MAX_IMAGES_PER_LISTING: usize = 4;

/// Maximum length of a listing title in characters
pub const MAX_LISTING_TITLE_LENGTH: usize = 100;

/// Maximum length of a listing description in characters
pub const MAX_LISTING_DESCRIPTION_LENGTH: usize = 2000;

/// User input for a new listing, before images are attached
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    /// Listing title
    pub title: String,
    /// Listing description
    pub description: String,
    /// Asking price
    pub price: f64,
}

impl ListingDraft {
    /// Validate the draft fields.
    ///
    /// Titles and descriptions are checked after trimming; the trimmed values
    /// are what the workflow persists.
    pub fn validate(&self) -> Result<(), Error> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidDraft("title is empty".to_string()));
        }
        if title.chars().count() > MAX_LISTING_TITLE_LENGTH {
            return Err(Error::InvalidDraft(format!(
                "title exceeds {} characters",
                MAX_LISTING_TITLE_LENGTH
            )));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(Error::InvalidDraft("description is empty".to_string()));
        }
        if description.chars().count() > MAX_LISTING_DESCRIPTION_LENGTH {
            return Err(Error::InvalidDraft(format!(
                "description exceeds {} characters",
                MAX_LISTING_DESCRIPTION_LENGTH
            )));
        }

        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(Error::InvalidDraft("price must be greater than zero".to_string()));
        }

        Ok(())
    }
}

/// A user-selected image file handed to the upload workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingImageFile {
    /// The user's original filename
    pub name: String,
    /// The file's bytes
    pub data: Vec<u8>,
}

/// A normalized image ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImageUpload {
    /// The normalized blob
    pub blob: NormalizedBlob,
    /// The user's original filename, recorded as upload metadata
    pub original_name: String,
}

impl PreparedImageUpload {
    /// Size of the normalized blob in bytes
    pub fn byte_len(&self) -> usize {
        self.blob.len()
    }
}

/// The result of uploading one normalized image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// The storage key the blob was uploaded under
    pub key: String,
    /// The download URL issued by the object store
    pub url: String,
    /// Size of the uploaded blob in bytes
    pub byte_len: usize,
    /// SHA-256 hash of the uploaded bytes
    pub content_hash: [u8; 32],
}

/// One file's failure during multi-image processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    /// The user's original filename
    pub original_name: String,
    /// Human-readable failure reason
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ListingDraft {
        ListingDraft {
            title: "Mythic #120".to_string(),
            description: "70 skins".to_string(),
            price: 199.0,
        }
    }

    #[test]
    fn test_draft_validate_accepts_reasonable_input() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_draft_validate_trims_before_checking() {
        let d = ListingDraft {
            title: "   ".to_string(),
            ..draft()
        };
        assert!(matches!(d.validate(), Err(Error::InvalidDraft(_))));
    }

    #[test]
    fn test_draft_validate_rejects_oversized_fields() {
        let d = ListingDraft {
            title: "a".repeat(MAX_LISTING_TITLE_LENGTH + 1),
            ..draft()
        };
        assert!(matches!(d.validate(), Err(Error::InvalidDraft(_))));

        let d = ListingDraft {
            description: "a".repeat(MAX_LISTING_DESCRIPTION_LENGTH + 1),
            ..draft()
        };
        assert!(matches!(d.validate(), Err(Error::InvalidDraft(_))));
    }

    #[test]
    fn test_draft_validate_rejects_bad_prices() {
        for price in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let d = ListingDraft { price, ..draft() };
            assert!(matches!(d.validate(), Err(Error::InvalidDraft(_))));
        }
    }
}
