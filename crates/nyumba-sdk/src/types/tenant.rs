//! Tenant and lease schemas

use super::{require, require_positive, Validate};
use crate::error::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tenant together with the lease terms of their unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantLease {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub property_id: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub rent_amount: Decimal,
    /// Outstanding amount the tenant owes right now
    #[serde(default)]
    pub balance_due: Decimal,
    #[serde(default)]
    pub lease_start: Option<NaiveDate>,
    #[serde(default)]
    pub lease_end: Option<NaiveDate>,
}

/// Payload for creating or replacing a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRequest {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub property_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub rent_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_end: Option<NaiveDate>,
}

impl Validate for TenantRequest {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("phone", &self.phone)?;
        require("property_id", &self.property_id)?;
        require_positive("rent_amount", self.rent_amount)
    }
}
