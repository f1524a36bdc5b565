//! OTP-gated email change.
//!
//! Any email mutation goes through a two-step challenge: request an OTP
//! for the candidate address, then pair the received code with the new
//! email. The code is opaque client-side; only the server validates it
//! when the change is submitted.

use crate::error::{KitchensinkError, Result};
use crate::profile::ProfileField;
use crate::validation::validate_field;

/// An issued challenge: the server-side binding of an OTP to the
/// candidate email and requesting identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    pub otp_id: String,
    pub target_email: String,
}

/// Client-side state of the email-change sub-flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmailChangeFlow {
    /// No email change underway.
    #[default]
    Idle,
    /// The user typed a candidate address but no OTP was requested yet.
    AwaitingOtpRequest { new_email: String },
    /// An OTP was issued for `challenge.target_email`; waiting for the
    /// user to type the received code.
    AwaitingOtpEntry { challenge: OtpChallenge },
}

impl EmailChangeFlow {
    /// Starts the flow with a candidate address, validating it with the
    /// normal email rules first.
    pub fn begin(&mut self, new_email: impl Into<String>) -> Result<()> {
        let new_email = new_email.into();
        validate_field(ProfileField::Email, &new_email, None).into_result()?;
        *self = EmailChangeFlow::AwaitingOtpRequest { new_email };
        Ok(())
    }

    /// The address an OTP should be requested for.
    pub fn email_awaiting_otp(&self) -> Option<&str> {
        match self {
            EmailChangeFlow::AwaitingOtpRequest { new_email } => Some(new_email),
            _ => None,
        }
    }

    /// Records the issued challenge and moves to OTP entry.
    pub fn otp_requested(&mut self, otp_id: impl Into<String>) -> Result<()> {
        let EmailChangeFlow::AwaitingOtpRequest { new_email } = self else {
            return Err(KitchensinkError::invalid_state(
                "no email change awaiting an OTP request",
            ));
        };
        *self = EmailChangeFlow::AwaitingOtpEntry {
            challenge: OtpChallenge {
                otp_id: otp_id.into(),
                target_email: std::mem::take(new_email),
            },
        };
        Ok(())
    }

    /// Pairs the received code with the challenged email, returning
    /// `(new_email, otp)` ready to stage or submit. The flow resets to
    /// idle; the code itself is never inspected.
    pub fn provide_otp(&mut self, otp: impl Into<String>) -> Result<(String, String)> {
        let otp = otp.into();
        if otp.trim().is_empty() {
            return Err(KitchensinkError::invalid_state("OTP must not be empty"));
        }
        let EmailChangeFlow::AwaitingOtpEntry { challenge } = self else {
            return Err(KitchensinkError::invalid_state("no OTP challenge outstanding"));
        };
        let email = std::mem::take(&mut challenge.target_email);
        *self = EmailChangeFlow::Idle;
        Ok((email, otp))
    }

    /// Discards the draft and any outstanding challenge.
    pub fn cancel(&mut self) {
        *self = EmailChangeFlow::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EmailChangeFlow::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut flow = EmailChangeFlow::default();
        flow.begin("new@example.com").unwrap();
        assert_eq!(flow.email_awaiting_otp(), Some("new@example.com"));
        flow.otp_requested("otp-1").unwrap();
        let (email, otp) = flow.provide_otp("123456").unwrap();
        assert_eq!(email, "new@example.com");
        assert_eq!(otp, "123456");
        assert!(flow.is_idle());
    }

    #[test]
    fn test_begin_validates_the_address() {
        let mut flow = EmailChangeFlow::default();
        let err = flow.begin("not-an-email").unwrap_err();
        assert!(err.is_validation());
        assert!(flow.is_idle());
    }

    #[test]
    fn test_empty_otp_rejected() {
        let mut flow = EmailChangeFlow::default();
        flow.begin("new@example.com").unwrap();
        flow.otp_requested("otp-1").unwrap();
        assert!(flow.provide_otp("  ").is_err());
        // Still waiting; the user can retype the code.
        assert!(matches!(flow, EmailChangeFlow::AwaitingOtpEntry { .. }));
    }

    #[test]
    fn test_out_of_order_transitions_rejected() {
        let mut flow = EmailChangeFlow::default();
        assert!(flow.otp_requested("otp-1").is_err());
        assert!(flow.provide_otp("123456").is_err());
    }

    #[test]
    fn test_cancel_discards_challenge() {
        let mut flow = EmailChangeFlow::default();
        flow.begin("new@example.com").unwrap();
        flow.otp_requested("otp-1").unwrap();
        flow.cancel();
        assert!(flow.is_idle());
        assert!(flow.provide_otp("123456").is_err());
    }
}
