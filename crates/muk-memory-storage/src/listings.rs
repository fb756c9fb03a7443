//! `ListingStorage` implementation for memory storage

use muk_storage_traits::error::MukStorageError;
use muk_storage_traits::listings::ListingStorage;
use muk_storage_traits::listings::types::{Listing, ListingStatus, NewListing};

use crate::{MukMemoryStorage, now_secs};

/// Length of generated record ids in bytes of entropy (hex-encoded to 16 chars)
const RECORD_ID_BYTES: usize = 8;

/// Generate a random record id
fn generate_record_id() -> Result<String, MukStorageError> {
    let mut bytes = [0u8; RECORD_ID_BYTES];
    getrandom::fill(&mut bytes)
        .map_err(|e| MukStorageError::Other(format!("random id generation failed: {e}")))?;
    Ok(hex::encode(bytes))
}

impl MukMemoryStorage {
    fn validate_new_listing(&self, listing: &NewListing) -> Result<(), MukStorageError> {
        if listing.title.len() > self.limits.max_title_length {
            return Err(MukStorageError::InvalidListing(format!(
                "title length {} exceeds maximum {}",
                listing.title.len(),
                self.limits.max_title_length
            )));
        }

        if listing.description.len() > self.limits.max_description_length {
            return Err(MukStorageError::InvalidListing(format!(
                "description length {} exceeds maximum {}",
                listing.description.len(),
                self.limits.max_description_length
            )));
        }

        if listing.image_urls.len() > self.limits.max_image_urls_per_listing {
            return Err(MukStorageError::InvalidListing(format!(
                "image URL count {} exceeds maximum {}",
                listing.image_urls.len(),
                self.limits.max_image_urls_per_listing
            )));
        }

        Ok(())
    }
}

impl ListingStorage for MukMemoryStorage {
    fn create_listing(&self, listing: NewListing) -> Result<Listing, MukStorageError> {
        self.validate_new_listing(&listing)?;

        let mut state = self.listings.write();

        if state.entries.len() >= self.limits.max_listings {
            return Err(MukStorageError::Database(format!(
                "listing count limit {} reached",
                self.limits.max_listings
            )));
        }

        let mut id = generate_record_id()?;
        while state.entries.contains_key(&id) {
            id = generate_record_id()?;
        }

        let record = Listing {
            id: id.clone(),
            title: listing.title,
            description: listing.description,
            price: listing.price,
            image_urls: listing.image_urls,
            owner_id: listing.owner_id,
            status: ListingStatus::Active,
            created_at: now_secs(),
            updated_at: None,
            sold_at: None,
        };

        state.entries.insert(id.clone(), record.clone());
        state.order.push(id);

        Ok(record)
    }

    fn find_listing_by_id(&self, id: &str) -> Result<Option<Listing>, MukStorageError> {
        Ok(self.listings.read().entries.get(id).cloned())
    }

    fn all_listings(&self) -> Result<Vec<Listing>, MukStorageError> {
        let state = self.listings.read();
        Ok(state
            .order
            .iter()
            .rev()
            .filter_map(|id| state.entries.get(id).cloned())
            .collect())
    }

    fn listings_by_owner(&self, owner_id: &str) -> Result<Vec<Listing>, MukStorageError> {
        let state = self.listings.read();
        Ok(state
            .order
            .iter()
            .rev()
            .filter_map(|id| state.entries.get(id))
            .filter(|listing| listing.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn mark_listing_sold(&self, id: &str) -> Result<Listing, MukStorageError> {
        let mut state = self.listings.write();
        let listing = state
            .entries
            .get_mut(id)
            .ok_or_else(|| MukStorageError::NotFound(format!("listing {id}")))?;

        let now = now_secs();
        listing.status = ListingStatus::Sold;
        listing.sold_at = Some(now);
        listing.updated_at = Some(now);

        Ok(listing.clone())
    }
}
