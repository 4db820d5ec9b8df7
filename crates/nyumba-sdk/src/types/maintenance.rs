//! Maintenance request schemas

use super::{require, Validate};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaintenancePriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl std::fmt::Display for MaintenancePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MaintenancePriority::Low => "low",
            MaintenancePriority::Medium => "medium",
            MaintenancePriority::High => "high",
            MaintenancePriority::Urgent => "urgent",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MaintenanceStatus::Open => "open",
            MaintenanceStatus::InProgress => "in progress",
            MaintenanceStatus::Resolved => "resolved",
            MaintenanceStatus::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// A maintenance request raised against a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub property_id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: MaintenancePriority,
    #[serde(default)]
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating or replacing a maintenance request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaintenanceRequest {
    pub property_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: MaintenancePriority,
    #[serde(default)]
    pub status: MaintenanceStatus,
}

impl Validate for NewMaintenanceRequest {
    fn validate(&self) -> Result<()> {
        require("property_id", &self.property_id)?;
        require("title", &self.title)?;
        require("description", &self.description)
    }
}
