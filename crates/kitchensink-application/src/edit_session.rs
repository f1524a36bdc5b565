//! Profile edit session: the field-update workflow.
//!
//! One session per viewed profile. A non-admin editing themself stages
//! field edits locally, then saves them as one batched request that the
//! server turns into pending update requests. An admin editing another
//! user skips staging and applies each field immediately. Email changes
//! additionally pass through the OTP sub-flow before they can be staged
//! or applied.

use crate::form::FormPhase;
use kitchensink_core::api::{FieldUpdate, ProfileApi};
use kitchensink_core::error::{KitchensinkError, Result};
use kitchensink_core::otp::EmailChangeFlow;
use kitchensink_core::pending::{PendingChange, PendingChanges};
use kitchensink_core::profile::{Profile, ProfileField};
use kitchensink_core::session::{AuthSession, EditMode, ProfileAccess};
use kitchensink_core::update_request::UpdateRequest;
use kitchensink_core::validation::{FieldErrors, validate_field};
use std::sync::Arc;

/// Workflow state for editing one profile.
pub struct ProfileEditSession {
    api: Arc<dyn ProfileApi>,
    profile: Profile,
    access: ProfileAccess,
    editing: Option<ProfileField>,
    pending: PendingChanges,
    field_errors: FieldErrors,
    email_flow: EmailChangeFlow,
    phase: FormPhase,
    update_requests: Vec<UpdateRequest>,
}

impl ProfileEditSession {
    /// Loads the profile for `user_id` and derives the viewer's access.
    /// For a self view the user's update-request list is loaded too.
    pub async fn open(
        api: Arc<dyn ProfileApi>,
        acting: &AuthSession,
        user_id: &str,
    ) -> Result<Self> {
        let profile = api.get_profile(user_id).await?;
        let access = ProfileAccess::evaluate(acting, user_id);
        let update_requests = if access.is_self {
            api.list_update_requests(user_id).await?
        } else {
            Vec::new()
        };
        Ok(Self {
            api,
            profile,
            access,
            editing: None,
            pending: PendingChanges::new(),
            field_errors: FieldErrors::new(),
            email_flow: EmailChangeFlow::default(),
            phase: FormPhase::default(),
            update_requests,
        })
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn access(&self) -> ProfileAccess {
        self.access
    }

    pub fn editing(&self) -> Option<ProfileField> {
        self.editing
    }

    pub fn pending(&self) -> &PendingChanges {
        &self.pending
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn email_flow(&self) -> &EmailChangeFlow {
        &self.email_flow
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn update_requests(&self) -> &[UpdateRequest] {
        &self.update_requests
    }

    // ------------------------------------------------------------------
    // Field editing and staging
    // ------------------------------------------------------------------

    /// Opens an editor for `field`, returning the current value as the
    /// draft default. Email is excluded: it goes through the OTP flow.
    pub fn begin_edit(&mut self, field: ProfileField) -> Result<String> {
        if !self.access.can_edit() {
            return Err(KitchensinkError::forbidden("This profile is read-only"));
        }
        if field == ProfileField::Email {
            return Err(KitchensinkError::invalid_state(
                "email changes go through the OTP flow",
            ));
        }
        self.editing = Some(field);
        Ok(self.profile.field_value(field))
    }

    /// Closes the open editor, discarding its draft.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.field_errors = FieldErrors::new();
    }

    /// Validates and stages the open editor's value. On success the
    /// editor closes and any displayed error for that field is cleared;
    /// in direct-apply mode the update is submitted immediately instead
    /// of staged.
    pub async fn stage_current(&mut self, value: &str, isd_code: Option<&str>) -> Result<()> {
        let field = self
            .editing
            .ok_or_else(|| KitchensinkError::invalid_state("no field is being edited"))?;
        let errors = validate_field(field, value, isd_code);
        if !errors.is_empty() {
            self.field_errors.merge(errors.clone());
            return Err(KitchensinkError::Validation(errors));
        }

        let mut change = PendingChange::new(value);
        if field == ProfileField::PhoneNumber {
            change.isd_code = Some(isd_code.unwrap_or("+91").to_string());
        }

        match self.edit_mode()? {
            EditMode::DirectApply => {
                self.submit_updates(vec![to_field_update(field, &change)], "Profile updated")
                    .await?;
                self.editing = None;
                self.field_errors.clear_field(&field.api_name());
                Ok(())
            }
            EditMode::RequestApproval => {
                self.pending.stage(field, change);
                self.editing = None;
                // Staging clears this field's error, and only this field's.
                self.field_errors.clear_field(&field.api_name());
                if field == ProfileField::PhoneNumber {
                    self.field_errors.clear_field("isdCode");
                }
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Email change (OTP-gated)
    // ------------------------------------------------------------------

    /// Starts an email change with a candidate address.
    pub fn begin_email_change(&mut self, new_email: &str) -> Result<()> {
        if !self.access.can_edit() {
            return Err(KitchensinkError::forbidden("This profile is read-only"));
        }
        match self.email_flow.begin(new_email) {
            Ok(()) => {
                self.field_errors.clear_field("email");
                Ok(())
            }
            Err(error) => {
                if let Some(fields) = error.field_errors() {
                    self.field_errors.merge(fields.clone());
                }
                Err(error)
            }
        }
    }

    /// Asks the server to send an OTP to the candidate address.
    pub async fn request_email_otp(&mut self) -> Result<()> {
        let new_email = self
            .email_flow
            .email_awaiting_otp()
            .ok_or_else(|| KitchensinkError::invalid_state("no email change awaiting an OTP"))?
            .to_string();
        let otp_id = self
            .api
            .request_email_otp(&self.profile.user_id, &new_email)
            .await?;
        self.email_flow.otp_requested(otp_id)
    }

    /// Pairs the received code with the candidate email. Staged for
    /// self-edits; submitted immediately in direct-apply mode.
    pub async fn confirm_email_change(&mut self, otp: &str) -> Result<()> {
        let (new_email, otp) = self.email_flow.provide_otp(otp)?;
        let change = PendingChange::new(new_email).with_otp(otp);
        match self.edit_mode()? {
            EditMode::DirectApply => {
                self.submit_updates(
                    vec![to_field_update(ProfileField::Email, &change)],
                    "Email updated",
                )
                .await
            }
            EditMode::RequestApproval => {
                self.pending.stage(ProfileField::Email, change);
                self.field_errors.clear_field("email");
                Ok(())
            }
        }
    }

    /// Abandons the email change at either step.
    pub fn cancel_email_change(&mut self) {
        self.email_flow.cancel();
    }

    // ------------------------------------------------------------------
    // Batched save
    // ------------------------------------------------------------------

    /// Submits every staged change as one batched request.
    ///
    /// Nothing is revalidated here (staging already validated). On
    /// success the store and OTP state are cleared and the profile and
    /// request list reload; on failure the staged changes are kept so
    /// the user can retry or cancel.
    pub async fn save_all(&mut self) -> Result<()> {
        if !self.pending.has_pending() {
            return Err(KitchensinkError::invalid_state("no staged changes to save"));
        }
        if !self.email_flow.is_idle() {
            return Err(KitchensinkError::invalid_state(
                "an email change is still awaiting its OTP",
            ));
        }
        let updates: Vec<FieldUpdate> = self
            .pending
            .entries()
            .map(|(field, change)| to_field_update(field, change))
            .collect();
        // The server is authoritative on OTP checks, but an email entry
        // with no code is known-incomplete; refuse before the round trip.
        if updates
            .iter()
            .any(|u| u.field_name == "email" && u.otp.as_deref().unwrap_or("").is_empty())
        {
            return Err(KitchensinkError::invalid_state(
                "email change is missing its OTP",
            ));
        }
        let message = match self.edit_mode()? {
            EditMode::RequestApproval => {
                format!("{} update request(s) created successfully", updates.len())
            }
            EditMode::DirectApply => "Profile updated".to_string(),
        };
        self.submit_updates(updates, &message).await?;
        self.pending.discard_all();
        self.email_flow.cancel();
        Ok(())
    }

    /// Discards every staged change and any email-change state.
    pub fn cancel_all(&mut self) {
        self.pending.discard_all();
        self.editing = None;
        self.email_flow.cancel();
        self.field_errors = FieldErrors::new();
        self.phase.reset();
    }

    // ------------------------------------------------------------------
    // Update requests (self view)
    // ------------------------------------------------------------------

    /// Revokes one of the viewer's own requests. Only pending requests
    /// can be revoked; anything already reviewed is refused locally.
    pub async fn revoke_request(&mut self, request_id: &str) -> Result<()> {
        let request = self
            .update_requests
            .iter()
            .find(|r| r.id == request_id)
            .ok_or_else(|| KitchensinkError::invalid_state("unknown update request"))?;
        if !request.status.is_actionable() {
            return Err(KitchensinkError::invalid_state(
                "only pending requests can be revoked",
            ));
        }
        self.phase.begin()?;
        match self
            .api
            .revoke_update_request(&self.profile.user_id, request_id)
            .await
        {
            Ok(()) => {
                self.phase.succeed("Update request revoked successfully");
                self.reload_requests().await
            }
            Err(error) => {
                self.phase.fail(error.user_message());
                Err(error)
            }
        }
    }

    /// Reloads the profile snapshot and, for self views, the request
    /// list.
    pub async fn reload(&mut self) -> Result<()> {
        self.profile = self.api.get_profile(&self.profile.user_id).await?;
        if self.access.is_self {
            self.reload_requests().await?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn edit_mode(&self) -> Result<EditMode> {
        self.access
            .edit_mode()
            .ok_or_else(|| KitchensinkError::forbidden("This profile is read-only"))
    }

    async fn submit_updates(&mut self, updates: Vec<FieldUpdate>, success: &str) -> Result<()> {
        self.phase.begin()?;
        tracing::debug!(
            "Submitting {} update(s) for {}",
            updates.len(),
            self.profile.user_id
        );
        match self.api.update_fields(&self.profile.user_id, &updates).await {
            Ok(()) => {
                self.phase.succeed(success);
                self.reload().await
            }
            Err(error) => {
                // Server re-checks land in the same per-field display as
                // local validation; everything else is a page banner.
                if let Some(fields) = error.field_errors() {
                    self.field_errors.merge(fields.clone());
                }
                self.phase.fail(error.user_message());
                Err(error)
            }
        }
    }

    async fn reload_requests(&mut self) -> Result<()> {
        self.update_requests = self.api.list_update_requests(&self.profile.user_id).await?;
        Ok(())
    }
}

fn to_field_update(field: ProfileField, change: &PendingChange) -> FieldUpdate {
    FieldUpdate {
        field_name: field.api_name(),
        value: change.value.clone(),
        otp: change.otp.clone(),
        isd_code: change.isd_code.clone(),
    }
}
