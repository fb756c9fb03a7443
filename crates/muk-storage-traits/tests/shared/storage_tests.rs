//! Provider-generic storage tests
//!
//! Each function takes a fresh provider instance and exercises one slice of
//! the `MukStorageProvider` contract, so every backend runs the same suite.

use muk_storage_traits::MukStorageProvider;
use muk_storage_traits::error::MukStorageError;
use muk_storage_traits::listings::ListingStorage;
use muk_storage_traits::listings::types::{ListingStatus, NewListing};
use muk_storage_traits::objects::ObjectStorage;
use muk_storage_traits::objects::types::ObjectMetadata;

fn sample_listing(owner_id: &str, title: &str) -> NewListing {
    NewListing {
        title: title.to_string(),
        description: "rank transfer included".to_string(),
        price: 199.0,
        image_urls: vec!["url-a".to_string(), "url-b".to_string()],
        owner_id: owner_id.to_string(),
    }
}

pub fn test_put_and_check_object<S: MukStorageProvider>(storage: S) {
    let key = "listings/u1/1700000000_0_a1b2c3d4_photo.jpg";
    let url = storage
        .put_object(
            key,
            &[0xFF, 0xD8, 0xFF, 0xE0],
            "image/jpeg",
            &ObjectMetadata::with_original_name("photo.jpg"),
        )
        .expect("put_object should succeed");

    assert!(!url.is_empty(), "backend must issue a download URL");
    assert!(storage.object_exists(key).unwrap());
    assert!(!storage.object_exists("listings/u1/other.jpg").unwrap());
}

pub fn test_put_object_rejects_invalid_key<S: MukStorageProvider>(storage: S) {
    let result = storage.put_object(
        "listings/../secret.jpg",
        &[0u8; 4],
        "image/jpeg",
        &ObjectMetadata::new(),
    );
    assert!(matches!(result, Err(MukStorageError::InvalidKey(_))));

    let result = storage.put_object("", &[0u8; 4], "image/jpeg", &ObjectMetadata::new());
    assert!(matches!(result, Err(MukStorageError::InvalidKey(_))));
}

pub fn test_put_object_overwrites<S: MukStorageProvider>(storage: S) {
    let key = "listings/u1/replaced.jpg";
    storage
        .put_object(key, &[1u8; 8], "image/jpeg", &ObjectMetadata::new())
        .unwrap();
    storage
        .put_object(key, &[2u8; 16], "image/jpeg", &ObjectMetadata::new())
        .unwrap();

    assert!(storage.object_exists(key).unwrap());
}

pub fn test_create_and_find_listing<S: MukStorageProvider>(storage: S) {
    let created = storage
        .create_listing(sample_listing("u1", "Immortal #12"))
        .expect("create_listing should succeed");

    assert!(!created.id.is_empty(), "backend must assign a record id");
    assert!(created.created_at > 0, "backend must stamp created_at");
    assert_eq!(created.status, ListingStatus::Active);
    assert_eq!(created.updated_at, None);
    assert_eq!(created.sold_at, None);
    assert_eq!(created.primary_image_url(), Some("url-a"));

    let found = storage.find_listing_by_id(&created.id).unwrap();
    assert_eq!(found, Some(created));

    assert_eq!(storage.find_listing_by_id("missing").unwrap(), None);
}

pub fn test_all_listings_newest_first<S: MukStorageProvider>(storage: S) {
    let first = storage
        .create_listing(sample_listing("u1", "first"))
        .unwrap();
    let second = storage
        .create_listing(sample_listing("u2", "second"))
        .unwrap();

    let all = storage.all_listings().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[1].id, first.id);
}

pub fn test_listings_by_owner<S: MukStorageProvider>(storage: S) {
    storage
        .create_listing(sample_listing("u1", "older"))
        .unwrap();
    storage
        .create_listing(sample_listing("u2", "other owner"))
        .unwrap();
    let newest = storage
        .create_listing(sample_listing("u1", "newer"))
        .unwrap();

    let owned = storage.listings_by_owner("u1").unwrap();
    assert_eq!(owned.len(), 2);
    assert_eq!(owned[0].id, newest.id);
    assert!(owned.iter().all(|l| l.owner_id == "u1"));

    assert!(storage.listings_by_owner("nobody").unwrap().is_empty());
}

pub fn test_mark_listing_sold<S: MukStorageProvider>(storage: S) {
    let created = storage
        .create_listing(sample_listing("u1", "Mythic #120"))
        .unwrap();

    let sold = storage.mark_listing_sold(&created.id).unwrap();
    assert_eq!(sold.status, ListingStatus::Sold);
    assert!(sold.sold_at.is_some());
    assert!(sold.updated_at.is_some());

    let found = storage.find_listing_by_id(&created.id).unwrap().unwrap();
    assert_eq!(found.status, ListingStatus::Sold);
}

pub fn test_mark_listing_sold_missing<S: MukStorageProvider>(storage: S) {
    let result = storage.mark_listing_sold("missing");
    assert!(matches!(result, Err(MukStorageError::NotFound(_))));
}
