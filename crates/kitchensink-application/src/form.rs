//! Explicit per-form submission state.
//!
//! Replaces ad hoc loading/error flags: each form owns one `FormPhase`,
//! and a mutation may only start from a non-submitting phase, so a slow
//! request cannot be double-fired.

use kitchensink_core::error::{KitchensinkError, Result};

/// Lifecycle of one form's current (or last) submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    /// A request is in flight; further submissions are refused.
    Submitting,
    /// The last submission succeeded, with a user-facing banner message.
    Succeeded(String),
    /// The last submission failed, with a user-facing banner message.
    Failed(String),
}

impl FormPhase {
    /// Marks a submission as started. Fails when one is already in
    /// flight.
    pub fn begin(&mut self) -> Result<()> {
        if self.is_submitting() {
            return Err(KitchensinkError::invalid_state(
                "a request is already in flight for this form",
            ));
        }
        *self = FormPhase::Submitting;
        Ok(())
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        *self = FormPhase::Succeeded(message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = FormPhase::Failed(message.into());
    }

    pub fn reset(&mut self) {
        *self = FormPhase::Idle;
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormPhase::Submitting)
    }

    /// The banner message to display, if the last submission finished.
    pub fn message(&self) -> Option<&str> {
        match self {
            FormPhase::Succeeded(message) | FormPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FormPhase::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_blocks_reentry() {
        let mut phase = FormPhase::default();
        phase.begin().unwrap();
        assert!(phase.is_submitting());
        assert!(phase.begin().is_err());
    }

    #[test]
    fn test_begin_allowed_after_completion() {
        let mut phase = FormPhase::default();
        phase.begin().unwrap();
        phase.fail("boom");
        assert_eq!(phase.message(), Some("boom"));
        phase.begin().unwrap();
        phase.succeed("done");
        assert_eq!(phase.message(), Some("done"));
        assert!(!phase.is_failed());
    }
}
