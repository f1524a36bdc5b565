//! Two-step OTP login.
//!
//! The user supplies an email, receives a one-time passcode out of
//! band, and exchanges it for a session. On success the session is
//! written to the shared store and the role is handed back so the
//! caller can route (admin console vs. own profile).

use crate::form::FormPhase;
use kitchensink_core::api::AuthApi;
use kitchensink_core::error::Result;
use kitchensink_core::profile::{ProfileField, Role};
use kitchensink_core::validation::validate_field;
use kitchensink_infrastructure::SessionStore;
use std::sync::Arc;

/// Which input the login screen is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    EnterEmail,
    EnterOtp { email: String },
}

/// Drives the login screen.
pub struct LoginFlow {
    api: Arc<dyn AuthApi>,
    store: SessionStore,
    step: LoginStep,
    phase: FormPhase,
}

impl LoginFlow {
    pub fn new(api: Arc<dyn AuthApi>, store: SessionStore) -> Self {
        Self {
            api,
            store,
            step: LoginStep::EnterEmail,
            phase: FormPhase::default(),
        }
    }

    pub fn step(&self) -> &LoginStep {
        &self.step
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Validates the email and asks the server to send a login code.
    pub async fn request_otp(&mut self, email: &str) -> Result<()> {
        validate_field(ProfileField::Email, email, None).into_result()?;
        self.phase.begin()?;
        match self.api.request_login_otp(email).await {
            Ok(()) => {
                self.phase.succeed("OTP sent to your email");
                self.step = LoginStep::EnterOtp {
                    email: email.to_string(),
                };
                Ok(())
            }
            Err(error) => {
                self.phase.fail(error.user_message());
                Err(error)
            }
        }
    }

    /// Exchanges the received code for a session and caches it.
    pub async fn verify(&mut self, otp: &str) -> Result<Role> {
        let LoginStep::EnterOtp { email } = self.step.clone() else {
            return Err(kitchensink_core::KitchensinkError::invalid_state(
                "request an OTP before verifying one",
            ));
        };
        self.phase.begin()?;
        match self.api.verify_login(&email, otp).await {
            Ok(session) => {
                let role = session.role;
                tracing::info!("Logged in as {} ({:?})", session.user_id, role);
                self.store.set(session);
                self.phase.succeed("Logged in");
                Ok(role)
            }
            Err(error) => {
                self.phase.fail(error.user_message());
                Err(error)
            }
        }
    }

    /// Returns to the email step, discarding the outstanding code.
    pub fn back(&mut self) {
        self.step = LoginStep::EnterEmail;
        self.phase.reset();
    }
}
