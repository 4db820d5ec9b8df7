//! Landlord subscription schemas

use super::{require, Validate};
use crate::error::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Annual,
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillingCycle::Monthly => f.write_str("monthly"),
            BillingCycle::Annual => f.write_str("annual"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(alias = "_id")]
    pub id: String,
    pub plan: String,
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    pub status: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub renews_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub plan: String,
    #[serde(default)]
    pub billing_cycle: BillingCycle,
}

impl Validate for SubscriptionRequest {
    fn validate(&self) -> Result<()> {
        require("plan", &self.plan)
    }
}
