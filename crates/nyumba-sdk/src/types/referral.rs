//! Referral schemas

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    #[default]
    Pending,
    Joined,
    Rewarded,
}

impl std::fmt::Display for ReferralStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReferralStatus::Pending => "pending",
            ReferralStatus::Joined => "joined",
            ReferralStatus::Rewarded => "rewarded",
        };
        f.write_str(s)
    }
}

/// A person the current user referred to the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub referred_name: String,
    #[serde(default)]
    pub referred_email: Option<String>,
    #[serde(default)]
    pub status: ReferralStatus,
    #[serde(default)]
    pub reward: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
