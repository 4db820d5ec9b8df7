//! Property listing schemas

use super::{require, require_positive, Validate};
use crate::error::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Publication state of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Available,
    Occupied,
    Draft,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ListingStatus::Available => "available",
            ListingStatus::Occupied => "occupied",
            ListingStatus::Draft => "draft",
        };
        f.write_str(s)
    }
}

/// A property listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    /// Monthly rent
    pub price: Decimal,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Search filters for `GET /api/listings`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
}

/// Payload for creating or replacing a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Validate for ListingRequest {
    fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("location", &self.location)?;
        require_positive("price", self.price)
    }
}
