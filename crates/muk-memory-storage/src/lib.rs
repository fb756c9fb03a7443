//! Memory-based storage implementation for MUK.
//!
//! This crate provides a memory-based storage backend for MUK (Media Upload Kit).
//! It implements the `MukStorageProvider` trait, storing uploaded objects and
//! listing records in process memory.
//!
//! Memory-based storage is non-persistent and will be cleared when the application
//! terminates. It's useful for testing or ephemeral applications where persistence
//! isn't required.
//!
//! ## Memory Exhaustion Protection
//!
//! This implementation includes input validation to prevent memory exhaustion.
//! The following limits are enforced (with configurable defaults via
//! [`ValidationLimits`]):
//!
//! - [`DEFAULT_MAX_OBJECTS`]: Maximum number of objects kept in the LRU cache
//! - [`DEFAULT_MAX_OBJECT_BYTES`]: Maximum size of a single stored object
//! - [`DEFAULT_MAX_METADATA_ENTRIES`]: Maximum custom metadata entries per object
//! - [`DEFAULT_MAX_LISTINGS`]: Maximum number of listing records
//! - [`DEFAULT_MAX_IMAGE_URLS_PER_LISTING`]: Maximum image URLs per listing record
//! - [`DEFAULT_MAX_TITLE_LENGTH`]: Maximum length of a listing title in bytes
//! - [`DEFAULT_MAX_DESCRIPTION_LENGTH`]: Maximum length of a listing description in bytes
//!
//! When the object cache is full, the least recently stored object is evicted.
//!
//! ## Customizing Limits
//!
//! You can customize these limits using [`ValidationLimits`] and the builder pattern:
//!
//! ```rust
//! use muk_memory_storage::{MukMemoryStorage, ValidationLimits};
//!
//! let limits = ValidationLimits::default()
//!     .with_max_objects(64)
//!     .with_max_object_bytes(512 * 1024)
//!     .with_max_listings(500);
//!
//! let storage = MukMemoryStorage::with_limits(limits);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::{SystemTime, UNIX_EPOCH};

use lru::LruCache;
use muk_storage_traits::listings::types::Listing;
use muk_storage_traits::objects::types::StoredObject;
use muk_storage_traits::{Backend, MukStorageProvider};
use parking_lot::RwLock;

mod listings;
mod objects;

/// Default maximum number of objects kept in the LRU cache.
/// When the cache is full, the least recently stored object is evicted.
pub const DEFAULT_MAX_OBJECTS: usize = 1024;

/// Default maximum size of a single stored object in bytes (10 MiB).
/// Normalized listing images are far smaller; this bound caps worst-case
/// memory per entry for other callers.
pub const DEFAULT_MAX_OBJECT_BYTES: usize = 10 * 1024 * 1024;

/// Default maximum number of custom metadata entries per object.
/// This prevents a single upload from growing its cache entry unboundedly.
pub const DEFAULT_MAX_METADATA_ENTRIES: usize = 32;

/// Default maximum number of listing records.
pub const DEFAULT_MAX_LISTINGS: usize = 10_000;

/// Default maximum number of image URLs per listing record.
pub const DEFAULT_MAX_IMAGE_URLS_PER_LISTING: usize = 16;

/// Default maximum length of a listing title in bytes (not characters).
/// Multi-byte UTF-8 characters count as multiple bytes toward this limit.
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 256;

/// Default maximum length of a listing description in bytes (not characters).
/// Multi-byte UTF-8 characters count as multiple bytes toward this limit.
pub const DEFAULT_MAX_DESCRIPTION_LENGTH: usize = 4096;

/// Configurable validation limits for memory storage.
///
/// This struct allows customization of the various limits used to prevent
/// memory exhaustion. All limits have sensible defaults that can be
/// overridden using the builder pattern.
///
/// # Example
///
/// ```rust
/// use muk_memory_storage::ValidationLimits;
///
/// let limits = ValidationLimits::default()
///     .with_max_objects(64)
///     .with_max_object_bytes(512 * 1024);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValidationLimits {
    /// Maximum number of objects kept in the LRU cache
    pub max_objects: usize,
    /// Maximum size of a single stored object in bytes
    pub max_object_bytes: usize,
    /// Maximum number of custom metadata entries per object
    pub max_metadata_entries: usize,
    /// Maximum number of listing records
    pub max_listings: usize,
    /// Maximum number of image URLs per listing record
    pub max_image_urls_per_listing: usize,
    /// Maximum length of a listing title in bytes
    pub max_title_length: usize,
    /// Maximum length of a listing description in bytes
    pub max_description_length: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_objects: DEFAULT_MAX_OBJECTS,
            max_object_bytes: DEFAULT_MAX_OBJECT_BYTES,
            max_metadata_entries: DEFAULT_MAX_METADATA_ENTRIES,
            max_listings: DEFAULT_MAX_LISTINGS,
            max_image_urls_per_listing: DEFAULT_MAX_IMAGE_URLS_PER_LISTING,
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
            max_description_length: DEFAULT_MAX_DESCRIPTION_LENGTH,
        }
    }
}

impl ValidationLimits {
    /// Set the maximum number of cached objects
    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }

    /// Set the maximum size of a single stored object in bytes
    pub fn with_max_object_bytes(mut self, max_object_bytes: usize) -> Self {
        self.max_object_bytes = max_object_bytes;
        self
    }

    /// Set the maximum number of custom metadata entries per object
    pub fn with_max_metadata_entries(mut self, max_metadata_entries: usize) -> Self {
        self.max_metadata_entries = max_metadata_entries;
        self
    }

    /// Set the maximum number of listing records
    pub fn with_max_listings(mut self, max_listings: usize) -> Self {
        self.max_listings = max_listings;
        self
    }

    /// Set the maximum number of image URLs per listing record
    pub fn with_max_image_urls_per_listing(mut self, max_image_urls: usize) -> Self {
        self.max_image_urls_per_listing = max_image_urls;
        self
    }
}

/// Listing records plus their creation order.
///
/// `order` holds record ids oldest-first; queries walk it in reverse so that
/// listings created in the same second still come back newest-first.
#[derive(Debug, Default)]
struct ListingsState {
    entries: HashMap<String, Listing>,
    order: Vec<String>,
}

/// In-memory storage backend for MUK.
///
/// Objects are kept in a bounded LRU cache and listing records in a plain
/// map, both behind RwLocks, so a single instance can serve concurrently
/// running uploads without external synchronization.
#[derive(Debug)]
pub struct MukMemoryStorage {
    limits: ValidationLimits,
    objects: RwLock<LruCache<String, StoredObject>>,
    listings: RwLock<ListingsState>,
}

impl Default for MukMemoryStorage {
    fn default() -> Self {
        Self::with_limits(ValidationLimits::default())
    }
}

impl MukMemoryStorage {
    /// Create a new memory storage with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new memory storage with custom limits
    pub fn with_limits(limits: ValidationLimits) -> Self {
        // A zero-capacity cache would reject every put; clamp to one entry.
        let capacity = NonZeroUsize::new(limits.max_objects.max(1)).expect("clamped to at least 1");
        Self {
            limits,
            objects: RwLock::new(LruCache::new(capacity)),
            listings: RwLock::new(ListingsState::default()),
        }
    }

    /// The limits this instance enforces
    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Fetch a stored object by key, if present.
    ///
    /// Test/inspection helper; the provider trait only exposes existence.
    pub fn get_object(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().peek(key).cloned()
    }

    /// Number of objects currently cached
    pub fn object_count(&self) -> usize {
        self.objects.read().len()
    }

    /// Number of listing records currently stored
    pub fn listing_count(&self) -> usize {
        self.listings.read().entries.len()
    }
}

impl MukStorageProvider for MukMemoryStorage {
    fn backend(&self) -> Backend {
        Backend::Memory
    }
}

/// Current Unix timestamp in seconds
pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_secs()
}
