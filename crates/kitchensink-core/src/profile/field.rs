//! Editable profile fields.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The profile fields a user can edit.
///
/// The string form of each variant is the wire name used both as the
/// `fieldName` of a field update and as the key of error maps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum ProfileField {
    #[strum(serialize = "name")]
    #[serde(rename = "name")]
    Name,
    #[strum(serialize = "email")]
    #[serde(rename = "email")]
    Email,
    #[strum(serialize = "phoneNumber")]
    #[serde(rename = "phoneNumber")]
    PhoneNumber,
    #[strum(serialize = "dateOfBirth")]
    #[serde(rename = "dateOfBirth")]
    DateOfBirth,
    #[strum(serialize = "address")]
    #[serde(rename = "address")]
    Address,
    #[strum(serialize = "city")]
    #[serde(rename = "city")]
    City,
    #[strum(serialize = "country")]
    #[serde(rename = "country")]
    Country,
}

impl ProfileField {
    /// Wire/display name ("phoneNumber" etc.).
    pub fn api_name(self) -> String {
        self.to_string()
    }

    /// Whether an empty value is acceptable for this field.
    pub fn is_required(self) -> bool {
        matches!(self, Self::Name | Self::Email | Self::PhoneNumber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wire_names_round_trip() {
        assert_eq!(ProfileField::PhoneNumber.api_name(), "phoneNumber");
        assert_eq!(
            ProfileField::from_str("dateOfBirth").unwrap(),
            ProfileField::DateOfBirth
        );
        assert!(ProfileField::from_str("nickname").is_err());
    }

    #[test]
    fn test_required_fields() {
        assert!(ProfileField::Name.is_required());
        assert!(ProfileField::Email.is_required());
        assert!(ProfileField::PhoneNumber.is_required());
        assert!(!ProfileField::City.is_required());
        assert!(!ProfileField::DateOfBirth.is_required());
    }

    #[test]
    fn test_serde_matches_strum() {
        let json = serde_json::to_string(&ProfileField::PhoneNumber).unwrap();
        assert_eq!(json, "\"phoneNumber\"");
    }
}
