//! Account settings schemas

use super::Validate;
use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub sms: bool,
}

/// Current account settings as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSettings {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

/// Partial update for `PUT /api/settings`; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationSettings>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.notifications.is_none()
    }
}

impl Validate for SettingsUpdate {
    fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ApiError::Validation {
                field: "settings".to_string(),
                message: "at least one setting must be provided".to_string(),
            });
        }
        let provided = [
            ("display_name", &self.display_name),
            ("email", &self.email),
            ("phone", &self.phone),
        ];
        for (field, value) in provided {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(ApiError::Validation {
                    field: field.to_string(),
                    message: "cannot be blank".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_rejected() {
        assert!(SettingsUpdate::default().validate().is_err());
    }

    #[test]
    fn test_blank_value_rejected() {
        let update = SettingsUpdate {
            phone: Some("".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            update.validate(),
            Err(ApiError::Validation { field, .. }) if field == "phone"
        ));
    }

    #[test]
    fn test_only_provided_fields_serialized() {
        let update = SettingsUpdate {
            display_name: Some("Mama Njeri".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({ "display_name": "Mama Njeri" }));
    }
}
