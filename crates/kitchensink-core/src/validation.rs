//! Field-level validation rules.
//!
//! One source of truth for the constraints the server enforces, so the
//! client can reject bad input before a request is sent. All functions
//! are pure; validating a set of fields reports every failing field in
//! one pass rather than stopping at the first.

use crate::profile::ProfileField;
use chrono::{Local, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static ALPHA_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static INDIAN_MOBILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").unwrap());
static DOB_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap());

/// Validation errors keyed by field name, one message per field.
///
/// The map form (rather than a list) mirrors the server's error
/// envelope, so client-raised and server-raised errors merge into the
/// same per-field display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for a field. The first message per field wins;
    /// later rules for an already-failed field are ignored.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Merges another error map in. Existing entries are kept, so
    /// client-side messages are not clobbered by a server re-check.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.0.entry(field).or_insert(message);
        }
    }

    /// Drops the error for one field, if present. Used when the user
    /// re-stages a field: only that field's error is cleared.
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Wraps a non-empty map into an error, or returns Ok(()).
    pub fn into_result(self) -> crate::error::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(crate::error::KitchensinkError::Validation(self))
        }
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Validates one field's candidate value.
///
/// `aux` carries the ISD code when validating `phoneNumber`; it is
/// ignored for every other field. Returns an empty map when the value
/// is acceptable. Empty optional fields always pass.
pub fn validate_field(field: ProfileField, value: &str, aux: Option<&str>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let trimmed = value.trim();

    match field {
        ProfileField::Name => {
            if trimmed.is_empty() {
                errors.push("name", "Name is required");
            } else if !ALPHA_SPACES.is_match(value) {
                errors.push("name", "Name must contain only letters and spaces");
            } else if value.chars().count() > 100 {
                errors.push("name", "Name must not exceed 100 characters");
            }
        }
        ProfileField::Email => {
            if trimmed.is_empty() {
                errors.push("email", "Email is required");
            } else if !EMAIL.is_match(value) {
                errors.push("email", "Email must have a valid format and domain");
            } else if value.chars().count() > 100 {
                errors.push("email", "Email must not exceed 100 characters");
            }
        }
        ProfileField::PhoneNumber => {
            if trimmed.is_empty() {
                errors.push("phoneNumber", "Phone number is required");
            } else if !INDIAN_MOBILE.is_match(value) {
                errors.push(
                    "phoneNumber",
                    "Phone number must be a valid Indian mobile number (10 digits starting with 6-9)",
                );
            }
            let isd = aux.unwrap_or("");
            if !matches!(isd, "" | "+91" | "91") {
                errors.push("isdCode", "ISD code must be +91 for Indian numbers");
            }
        }
        ProfileField::City => {
            if !trimmed.is_empty() {
                if !ALPHA_SPACES.is_match(value) {
                    errors.push("city", "City must contain only letters and spaces");
                } else if value.chars().count() > 50 {
                    errors.push("city", "City must not exceed 50 characters");
                }
            }
        }
        ProfileField::Country => {
            if !trimmed.is_empty() {
                if !ALPHA_SPACES.is_match(value) {
                    errors.push("country", "Country must contain only letters and spaces");
                } else if value.chars().count() > 50 {
                    errors.push("country", "Country must not exceed 50 characters");
                }
            }
        }
        ProfileField::Address => {
            if value.chars().count() > 200 {
                errors.push("address", "Address must not exceed 200 characters");
            }
        }
        ProfileField::DateOfBirth => {
            if !trimmed.is_empty() {
                validate_date_of_birth(trimmed, &mut errors);
            }
        }
    }

    errors
}

fn validate_date_of_birth(value: &str, errors: &mut FieldErrors) {
    if !DOB_FORMAT.is_match(value) {
        errors.push("dateOfBirth", "Date of birth must be in DD-MM-YYYY format");
        return;
    }
    // Strict parse: "31-02-2024" fails here rather than rolling over.
    let Ok(date) = NaiveDate::parse_from_str(value, "%d-%m-%Y") else {
        errors.push("dateOfBirth", "Invalid date");
        return;
    };
    let today = Local::now().date_naive();
    let hundred_years_ago = today
        .checked_sub_months(Months::new(1200))
        .unwrap_or(NaiveDate::MIN);
    if date > today {
        errors.push("dateOfBirth", "Date of birth cannot be a future date");
    } else if date < hundred_years_ago {
        errors.push("dateOfBirth", "Date of birth cannot be more than 100 years ago");
    }
}

/// Validates a full user form (admin create/update) in one pass.
///
/// Every failing field is reported together; optional fields are only
/// checked when non-empty.
pub fn validate_user_form(
    name: &str,
    email: &str,
    phone_number: &str,
    isd_code: Option<&str>,
    date_of_birth: Option<&str>,
    address: Option<&str>,
    city: Option<&str>,
    country: Option<&str>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.merge(validate_field(ProfileField::Name, name, None));
    errors.merge(validate_field(ProfileField::Email, email, None));
    errors.merge(validate_field(ProfileField::PhoneNumber, phone_number, isd_code));
    errors.merge(validate_field(
        ProfileField::DateOfBirth,
        date_of_birth.unwrap_or(""),
        None,
    ));
    errors.merge(validate_field(ProfileField::Address, address.unwrap_or(""), None));
    errors.merge(validate_field(ProfileField::City, city.unwrap_or(""), None));
    errors.merge(validate_field(ProfileField::Country, country.unwrap_or(""), None));
    errors
}
