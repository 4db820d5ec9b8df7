//! Request and response schemas for every Nyumba API endpoint
//!
//! Payloads that originate from user input implement [`Validate`] so that
//! required-field checks happen before anything goes over the wire.

pub mod inquiry;
pub mod listing;
pub mod maintenance;
pub mod payment;
pub mod referral;
pub mod settings;
pub mod subscription;
pub mod tenant;

pub use inquiry::{InquiryRequest, InquiryResponse};
pub use listing::{Listing, ListingQuery, ListingRequest, ListingStatus};
pub use maintenance::{
    MaintenancePriority, MaintenanceRequest, MaintenanceStatus, NewMaintenanceRequest,
};
pub use payment::{
    MpesaResponse, PayRequest, PayResponse, PaymentStatusResponse, RemotePaymentStatus,
};
pub use referral::{ReferralRecord, ReferralStatus};
pub use settings::{AccountSettings, NotificationSettings, SettingsUpdate};
pub use subscription::{BillingCycle, Subscription, SubscriptionRequest};
pub use tenant::{TenantLease, TenantRequest};

use crate::error::{ApiError, Result};
use rust_decimal::Decimal;

/// Client-side validation of a payload before it is sent
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Require a non-blank string field
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::required(field));
    }
    Ok(())
}

/// Require a strictly positive amount
pub(crate) fn require_positive(field: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(ApiError::Validation {
            field: field.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}
