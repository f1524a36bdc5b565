//! Profile domain model.
//!
//! The profile is owned by the server; the client holds a read-only
//! cached copy that is refreshed after every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of an account, as returned at login and on the profile snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Server-owned profile snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Stable account identifier.
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    /// Country calling code paired with `phone_number` (e.g. "+91").
    #[serde(default)]
    pub isd_code: Option<String>,
    /// Strict DD-MM-YYYY, when set.
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub role: Role,
    pub registration_date: DateTime<Utc>,
}

impl Profile {
    /// Current value of one editable field, used to prefill an editor.
    pub fn field_value(&self, field: super::field::ProfileField) -> String {
        use super::field::ProfileField;
        match field {
            ProfileField::Name => self.name.clone(),
            ProfileField::Email => self.email.clone(),
            ProfileField::PhoneNumber => self.phone_number.clone(),
            ProfileField::DateOfBirth => self.date_of_birth.clone().unwrap_or_default(),
            ProfileField::Address => self.address.clone().unwrap_or_default(),
            ProfileField::City => self.city.clone().unwrap_or_default(),
            ProfileField::Country => self.country.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "userId": "u-1",
            "name": "Asha Rao",
            "email": "asha@example.com",
            "phoneNumber": "9123456789",
            "isdCode": "+91",
            "dateOfBirth": "01-01-1990",
            "role": "USER",
            "registrationDate": "2024-03-01T10:00:00Z"
        }"#
    }

    #[test]
    fn test_profile_deserializes_camel_case() {
        let profile: Profile = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(profile.user_id, "u-1");
        assert_eq!(profile.phone_number, "9123456789");
        assert_eq!(profile.role, Role::User);
        assert!(profile.city.is_none());
    }

    #[test]
    fn test_role_wire_names_are_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");
    }
}
