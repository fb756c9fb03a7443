//! Listing upload manager
//!
//! This module contains the ListingUploadManager struct which drives the
//! listing-creation workflow: normalize each selected image to the byte
//! budget, upload the blobs to the object store, then persist the listing
//! record referencing the issued download URLs.

use muk_storage_traits::MukStorageProvider;
use muk_storage_traits::listings::ListingStorage;
use muk_storage_traits::listings::types::{Listing, NewListing};
use muk_storage_traits::objects::ObjectStorage;
use muk_storage_traits::objects::types::ObjectMetadata;

use crate::error::Error;
use crate::upload::key;
use crate::upload::types::{
    ListingDraft, ListingImageFile, MAX_IMAGES_PER_LISTING, PreparedImageUpload, UploadFailure,
    UploadedImage,
};
use crate::{MUK, normalizer::NORMALIZED_CONTENT_TYPE};

/// Manager for listing upload operations
///
/// Scoped to one seller account; storage keys embed the owner id.
pub struct ListingUploadManager<'a, Storage>
where
    Storage: MukStorageProvider,
{
    muk: &'a MUK<Storage>,
    owner_id: String,
}

impl<'a, Storage> ListingUploadManager<'a, Storage>
where
    Storage: MukStorageProvider,
{
    /// Create a new upload manager for a specific owner
    pub(crate) fn new(muk: &'a MUK<Storage>, owner_id: String) -> Self {
        Self { muk, owner_id }
    }

    /// The owner this manager uploads for
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Normalize one user-selected image for upload.
    ///
    /// # Parameters
    /// - `data`: The raw image file bytes
    /// - `original_name`: The user's original filename (recorded as upload metadata)
    pub fn prepare_image(
        &self,
        data: &[u8],
        original_name: &str,
    ) -> Result<PreparedImageUpload, Error> {
        key::validate_filename(original_name)?;

        let blob = self.muk.normalizer().normalize(data)?;
        Ok(PreparedImageUpload {
            blob,
            original_name: original_name.to_string(),
        })
    }

    /// Upload one prepared image to the object store.
    ///
    /// `index` is the image's position in the submission batch and becomes
    /// part of the generated storage key.
    pub fn upload_image(
        &self,
        index: usize,
        prepared: &PreparedImageUpload,
    ) -> Result<UploadedImage, Error> {
        key::validate_owner_id(&self.owner_id)?;

        let image_id = key::generate_image_id(index)?;
        let storage_key = key::listing_image_key(&self.owner_id, &image_id, &prepared.original_name);
        let metadata = ObjectMetadata::with_original_name(&prepared.original_name);

        let url = self.muk.storage().put_object(
            &storage_key,
            &prepared.blob.data,
            NORMALIZED_CONTENT_TYPE,
            &metadata,
        )?;

        tracing::debug!(
            target: "muk_core::upload",
            key = %storage_key,
            bytes = prepared.byte_len(),
            "uploaded listing image"
        );

        Ok(UploadedImage {
            key: storage_key,
            url,
            byte_len: prepared.byte_len(),
            content_hash: prepared.blob.content_hash,
        })
    }

    /// Create a listing from a draft and a batch of image files.
    ///
    /// At most [`MAX_IMAGES_PER_LISTING`] files are accepted; extra files are
    /// ignored. Every accepted file is normalized independently, so one bad
    /// file does not stop its siblings from being processed; if any file
    /// fails, all failures are reported together and nothing is uploaded or
    /// persisted. Upload failures after normalization may leave already
    /// uploaded blobs behind; the record referencing them is never written.
    pub fn create_listing(
        &self,
        draft: &ListingDraft,
        files: &[ListingImageFile],
    ) -> Result<Listing, Error> {
        key::validate_owner_id(&self.owner_id)?;
        draft.validate()?;

        let accepted = if files.len() > self.muk.config.max_images_per_listing {
            tracing::debug!(
                target: "muk_core::upload",
                submitted = files.len(),
                accepted = self.muk.config.max_images_per_listing,
                "ignoring images beyond the per-listing cap"
            );
            &files[..self.muk.config.max_images_per_listing]
        } else {
            files
        };

        let mut prepared = Vec::with_capacity(accepted.len());
        let mut failures = Vec::new();
        for file in accepted {
            match self.prepare_image(&file.data, &file.name) {
                Ok(upload) => prepared.push(upload),
                Err(e) => failures.push(UploadFailure {
                    original_name: file.name.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        if !failures.is_empty() {
            return Err(Error::ImageUploads { failures });
        }

        let mut image_urls = Vec::with_capacity(prepared.len());
        for (index, upload) in prepared.iter().enumerate() {
            let uploaded = self.upload_image(index, upload)?;
            image_urls.push(uploaded.url);
        }

        let record = NewListing {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            price: draft.price,
            image_urls,
            owner_id: self.owner_id.clone(),
        };

        let listing = self.muk.storage().create_listing(record)?;
        tracing::debug!(
            target: "muk_core::upload",
            listing_id = %listing.id,
            images = listing.image_urls.len(),
            "created listing"
        );

        Ok(listing)
    }
}
