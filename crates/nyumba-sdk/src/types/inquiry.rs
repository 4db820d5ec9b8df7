//! Listing inquiry schemas

use super::{require, Validate};
use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};

/// Message from a prospective tenant about a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryRequest {
    pub listing_id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

impl Validate for InquiryRequest {
    fn validate(&self) -> Result<()> {
        require("listing_id", &self.listing_id)?;
        require("name", &self.name)?;
        require("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(ApiError::Validation {
                field: "email".to_string(),
                message: "is not a valid email address".to_string(),
            });
        }
        require("message", &self.message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryResponse {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
