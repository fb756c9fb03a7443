//! A Rust implementation of the MUK (Media Upload Kit) pipeline
//!
//! This crate normalizes user-selected images to a hard byte budget and
//! drives the listing-creation upload workflow built on that guarantee.
//! It handles image decoding, the rescale/re-encode compression search,
//! storage-key construction, and persistence of listing records through a
//! pluggable storage provider.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]

use muk_storage_traits::MukStorageProvider;
use muk_storage_traits::listings::ListingStorage;
use muk_storage_traits::listings::types::Listing;

pub mod error;
pub mod normalizer;
pub mod prelude;
pub mod upload;

pub use self::error::Error;
use self::normalizer::{ImageNormalizer, NormalizeOptions, RasterCodec};
use self::upload::ListingUploadManager;
use self::upload::types::MAX_IMAGES_PER_LISTING;

/// Configuration for MUK behavior
///
/// This struct allows customization of the normalization and upload
/// parameters. All fields have defaults matching the documented pipeline.
///
/// # Examples
///
/// ```rust
/// use muk_core::MukConfig;
///
/// // Use defaults (recommended for most cases)
/// let config = MukConfig::default();
///
/// // Custom configuration
/// let config = MukConfig {
///     max_image_bytes: 100 * 1024, // tighter 100 KiB budget
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MukConfig {
    /// Hard upper bound on each normalized image's size in bytes.
    ///
    /// Every blob handed to the object store is guaranteed not to exceed
    /// this. Default: 204800 (200 KiB)
    pub max_image_bytes: usize,

    /// Width cap applied by the normalizer's initial downscale factor.
    ///
    /// Guards against oversized originals dominating encode time and output
    /// size; originals are never upscaled. Default: 1920
    pub max_width: u32,

    /// Maximum number of images accepted per listing.
    ///
    /// Files beyond this count are ignored, matching the submission form's
    /// behavior. Default: 4
    pub max_images_per_listing: usize,
}

impl Default for MukConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: normalizer::DEFAULT_MAX_BLOB_BYTES,
            max_width: normalizer::types::MAX_WIDTH,
            max_images_per_listing: MAX_IMAGES_PER_LISTING,
        }
    }
}

impl MukConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizer options derived from this configuration
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            max_bytes: self.max_image_bytes,
            max_width: self.max_width,
            ..Default::default()
        }
    }
}

/// Builder for constructing MUK instances
///
/// This builder provides a fluent API for configuring and creating MUK
/// instances.
///
/// # Examples
///
/// ```no_run
/// use muk_core::{MUK, MukConfig};
/// use muk_memory_storage::MukMemoryStorage;
///
/// // Simple usage with defaults
/// let muk = MUK::new(MukMemoryStorage::default());
///
/// // With custom configuration
/// let muk = MUK::builder(MukMemoryStorage::default())
///     .with_config(MukConfig::new())
///     .build();
/// ```
#[derive(Debug)]
pub struct MukBuilder<Storage> {
    storage: Storage,
    config: MukConfig,
}

impl<Storage> MukBuilder<Storage>
where
    Storage: MukStorageProvider,
{
    /// Create a new MUK builder with the given storage
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            config: MukConfig::default(),
        }
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: MukConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the MUK instance with the configured settings
    pub fn build(self) -> MUK<Storage> {
        tracing::debug!(
            backend = ?self.storage.backend(),
            max_image_bytes = self.config.max_image_bytes,
            "initializing MUK"
        );

        MUK {
            config: self.config,
            storage: self.storage,
        }
    }
}

/// The main struct for the MUK implementation.
///
/// This struct provides the core functionality of the kit:
/// - Image normalization to the configured byte budget
/// - Listing upload workflows (normalize, upload, persist the record)
/// - Listing record queries through the storage provider
///
/// It uses a generic storage provider that implements the
/// [`MukStorageProvider`] trait, allowing for flexible storage backends.
#[derive(Debug)]
pub struct MUK<Storage>
where
    Storage: MukStorageProvider,
{
    /// Configuration for normalization and upload behavior
    pub config: MukConfig,
    storage: Storage,
}

impl<Storage> MUK<Storage>
where
    Storage: MukStorageProvider,
{
    /// Create a builder for constructing a MUK instance
    ///
    /// This is the recommended way to create MUK instances when you need
    /// custom configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use muk_core::MUK;
    /// # use muk_memory_storage::MukMemoryStorage;
    /// let muk = MUK::builder(MukMemoryStorage::default()).build();
    /// ```
    pub fn builder(storage: Storage) -> MukBuilder<Storage> {
        MukBuilder::new(storage)
    }

    /// Construct a new MUK instance with default configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use muk_core::MUK;
    /// # use muk_memory_storage::MukMemoryStorage;
    /// let muk = MUK::new(MukMemoryStorage::default());
    /// ```
    pub fn new(storage: Storage) -> Self {
        Self::builder(storage).build()
    }

    /// An image normalizer configured from this instance's settings
    pub fn normalizer(&self) -> ImageNormalizer<RasterCodec> {
        ImageNormalizer::with_options(self.config.normalize_options())
    }

    /// An upload manager scoped to one seller account
    pub fn listing_uploads(&self, owner_id: &str) -> ListingUploadManager<'_, Storage> {
        ListingUploadManager::new(self, owner_id.to_string())
    }

    /// Find a listing by its record id
    pub fn find_listing(&self, id: &str) -> Result<Option<Listing>, Error> {
        Ok(self.storage.find_listing_by_id(id)?)
    }

    /// Get all listings, newest first
    pub fn all_listings(&self) -> Result<Vec<Listing>, Error> {
        Ok(self.storage.all_listings()?)
    }

    /// Get all listings owned by `owner_id`, newest first
    pub fn listings_by_owner(&self, owner_id: &str) -> Result<Vec<Listing>, Error> {
        Ok(self.storage.listings_by_owner(owner_id)?)
    }

    /// Mark a listing as sold
    pub fn mark_listing_sold(&self, id: &str) -> Result<Listing, Error> {
        Ok(self.storage.mark_listing_sold(id)?)
    }

    /// Get the storage provider
    pub(crate) fn storage(&self) -> &Storage {
        &self.storage
    }
}
