//! Listing upload workflow
//!
//! Normalized images are keyed under `listings/<owner>/...`, uploaded to the
//! object-store collaborator, and the issued download URLs are persisted in
//! a listing record. See [`manager::ListingUploadManager`] for the workflow
//! entry points.

pub mod key;
pub mod manager;
pub mod types;

pub use key::{MAX_FILENAME_LENGTH, validate_filename, validate_owner_id};
pub use manager::ListingUploadManager;
pub use types::{
    ListingDraft, ListingImageFile, MAX_IMAGES_PER_LISTING, PreparedImageUpload, UploadFailure,
    UploadedImage,
};
