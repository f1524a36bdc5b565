//! Staged, not-yet-submitted field edits.
//!
//! Pending changes exist only in client memory between "start edit" and
//! "save all" or "cancel"; they are never persisted.

use crate::profile::ProfileField;

/// One staged edit for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    /// The candidate value to submit.
    pub value: String,
    /// One-time passcode, required only for email changes.
    pub otp: Option<String>,
    /// Country calling code, carried only for phone changes.
    pub isd_code: Option<String>,
}

impl PendingChange {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            otp: None,
            isd_code: None,
        }
    }

    pub fn with_otp(mut self, otp: impl Into<String>) -> Self {
        self.otp = Some(otp.into());
        self
    }

    pub fn with_isd_code(mut self, isd_code: impl Into<String>) -> Self {
        self.isd_code = Some(isd_code.into());
        self
    }
}

/// In-memory store of staged edits, at most one per field.
///
/// Staging the same field again overwrites the earlier draft in place,
/// so `entries()` keeps the order fields were first staged in.
#[derive(Debug, Clone, Default)]
pub struct PendingChanges {
    entries: Vec<(ProfileField, PendingChange)>,
}

impl PendingChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the staged change for `field`.
    pub fn stage(&mut self, field: ProfileField, change: PendingChange) {
        if let Some(slot) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            slot.1 = change;
        } else {
            self.entries.push((field, change));
        }
    }

    /// Drops the staged change for one field, if present.
    pub fn discard(&mut self, field: ProfileField) {
        self.entries.retain(|(f, _)| *f != field);
    }

    /// Clears every staged change.
    pub fn discard_all(&mut self) {
        self.entries.clear();
    }

    pub fn has_pending(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, field: ProfileField) -> bool {
        self.entries.iter().any(|(f, _)| *f == field)
    }

    pub fn get(&self, field: ProfileField) -> Option<&PendingChange> {
        self.entries.iter().find(|(f, _)| *f == field).map(|(_, c)| c)
    }

    /// Ordered snapshot for submission.
    pub fn entries(&self) -> impl Iterator<Item = (ProfileField, &PendingChange)> {
        self.entries.iter().map(|(f, c)| (*f, c))
    }

    /// Staged field names, in staging order (for the pending banner).
    pub fn field_names(&self) -> Vec<String> {
        self.entries.iter().map(|(f, _)| f.api_name()).collect()
    }
}
