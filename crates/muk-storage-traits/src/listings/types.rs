//! Types for the listings module

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MukStorageError;

/// The state of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListingStatus {
    /// The listing is live and purchasable
    Active,
    /// The listing has been sold
    Sold,
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ListingStatus {
    /// Get as `&str`
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = MukStorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            _ => Err(MukStorageError::InvalidListing(format!(
                "Invalid listing status: {}",
                s
            ))),
        }
    }
}

impl Serialize for ListingStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ListingStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Input record for creating a listing.
///
/// The backend assigns the id and `created_at`; everything else is provided
/// by the upload workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    /// Listing title
    pub title: String,
    /// Listing description
    pub description: String,
    /// Asking price
    pub price: f64,
    /// Download URLs of the listing's normalized images; the primary image is index 0
    pub image_urls: Vec<String>,
    /// Id of the owning seller account
    pub owner_id: String,
}

/// A marketplace listing record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Backend-assigned record id
    pub id: String,
    /// Listing title
    pub title: String,
    /// Listing description
    pub description: String,
    /// Asking price
    pub price: f64,
    /// Download URLs of the listing's normalized images; the primary image is index 0
    pub image_urls: Vec<String>,
    /// Id of the owning seller account
    pub owner_id: String,
    /// The state of the listing
    pub status: ListingStatus,
    /// Unix timestamp (seconds) the record was created at, assigned by the backend
    pub created_at: u64,
    /// Unix timestamp (seconds) of the last record update, if any
    pub updated_at: Option<u64>,
    /// Unix timestamp (seconds) the listing was sold at, if sold
    pub sold_at: Option<u64>,
}

impl Listing {
    /// The primary image URL, if the listing has any images
    pub fn primary_image_url(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}
