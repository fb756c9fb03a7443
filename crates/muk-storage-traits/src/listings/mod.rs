//! Listings module
//!
//! This module defines the document-store collaborator interface for
//! marketplace listing records. The upload workflow persists one record per
//! created listing; record ids and creation timestamps are assigned by the
//! backend, matching hosted document-store semantics.

pub mod types;

use self::types::{Listing, NewListing};
use crate::error::MukStorageError;

/// Storage trait for the listings module
pub trait ListingStorage {
    /// Persist a new listing record.
    ///
    /// The backend assigns the record id and `created_at` timestamp and
    /// returns the stored record.
    fn create_listing(&self, listing: NewListing) -> Result<Listing, MukStorageError>;

    /// Find a listing by its record id
    fn find_listing_by_id(&self, id: &str) -> Result<Option<Listing>, MukStorageError>;

    /// Get all listings, newest first
    fn all_listings(&self) -> Result<Vec<Listing>, MukStorageError>;

    /// Get all listings owned by `owner_id`, newest first
    fn listings_by_owner(&self, owner_id: &str) -> Result<Vec<Listing>, MukStorageError>;

    /// Mark a listing as sold.
    ///
    /// Sets the status to [`types::ListingStatus::Sold`] and stamps `sold_at`
    /// and `updated_at`. Returns the updated record.
    fn mark_listing_sold(&self, id: &str) -> Result<Listing, MukStorageError>;
}
