//! Profile, preferences, payment methods and notifications.

use serde::{Deserialize, Serialize};

use crate::domain::auth::User;
use crate::domain::foundation::{NotificationHash, PaymentMethodHash, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub notifications: bool,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default)]
    pub push_notifications: bool,
}

/// Partial update for `PUT users/{hash}/preferences`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_notifications: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

/// Partial update for `PUT users/{hash}/profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Body of `PUT users/{hash}/password`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    current_password: String,
    new_password: String,
}

impl PasswordChange {
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let current_password = current_password.into();
        let new_password = new_password.into();
        if current_password.is_empty() {
            return Err(ValidationError::empty_field("currentPassword"));
        }
        if new_password.is_empty() {
            return Err(ValidationError::empty_field("newPassword"));
        }
        Ok(Self {
            current_password,
            new_password,
        })
    }
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordChange([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub hash: PaymentMethodHash,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub last4: String,
    #[serde(default)]
    pub expiry_month: u8,
    #[serde(default)]
    pub expiry_year: u16,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_active: bool,
}

/// Body of `POST users/{hash}/payment-methods`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentMethod {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl NewPaymentMethod {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.kind.trim().is_empty() {
            return Err(ValidationError::empty_field("type"));
        }
        if let Some(month) = self.expiry_month {
            if !(1..=12).contains(&month) {
                return Err(ValidationError::out_of_range(
                    "expiryMonth",
                    1,
                    12,
                    i64::from(month),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub hash: NotificationHash,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCount {
    pub unread: u32,
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_flattens_user_fields() {
        let profile: UserProfile = serde_json::from_value(json!({
            "hash": "u-1",
            "email": "ana@example.com",
            "firstName": "Ana",
            "lastName": "Lopez",
            "city": "Valencia",
            "preferences": {"language": "es", "notifications": true}
        }))
        .unwrap();

        assert_eq!(profile.user.first_name, "Ana");
        assert_eq!(profile.city.as_deref(), Some("Valencia"));
        assert_eq!(profile.preferences.unwrap().language, "es");
    }

    #[test]
    fn password_change_serializes_camel_case_and_redacts_debug() {
        let change = PasswordChange::new("old-pw", "new-pw").unwrap();

        assert_eq!(
            serde_json::to_value(&change).unwrap(),
            json!({"currentPassword": "old-pw", "newPassword": "new-pw"})
        );
        assert!(!format!("{:?}", change).contains("old-pw"));
        assert!(PasswordChange::new("", "x").is_err());
    }

    #[test]
    fn payment_method_uses_type_field() {
        let method: PaymentMethod = serde_json::from_value(json!({
            "hash": "pm-1",
            "type": "card",
            "brand": "visa",
            "last4": "4242",
            "expiryMonth": 12,
            "expiryYear": 2030,
            "isDefault": true
        }))
        .unwrap();

        assert_eq!(method.kind, "card");
        assert!(method.is_default);
    }

    #[test]
    fn new_payment_method_validates_month() {
        let method = NewPaymentMethod {
            kind: "card".to_string(),
            expiry_month: Some(13),
            ..Default::default()
        };
        assert!(method.validate().is_err());
        assert!(NewPaymentMethod::default().validate().is_err());
    }

    #[test]
    fn preferences_update_skips_unset_fields() {
        let update = PreferencesUpdate {
            push_notifications: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"pushNotifications": false})
        );
    }
}
