//! Admin moderation of pending update requests.

use crate::form::FormPhase;
use kitchensink_core::api::AdminApi;
use kitchensink_core::error::{KitchensinkError, Result};
use kitchensink_core::update_request::UpdateRequest;
use std::sync::Arc;

/// The admin's queue of update requests awaiting review.
pub struct ModerationQueue {
    api: Arc<dyn AdminApi>,
    requests: Vec<UpdateRequest>,
    phase: FormPhase,
}

impl ModerationQueue {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            requests: Vec::new(),
            phase: FormPhase::default(),
        }
    }

    pub fn requests(&self) -> &[UpdateRequest] {
        &self.requests
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Reloads the pending queue.
    pub async fn refresh(&mut self) -> Result<()> {
        self.requests = self.api.list_pending_requests().await?;
        Ok(())
    }

    /// Approves a request: the stored new value is applied server-side.
    pub async fn approve(&mut self, request_id: &str) -> Result<()> {
        self.phase.begin()?;
        match self.api.approve_request(request_id).await {
            Ok(()) => {
                self.phase.succeed("Update request approved");
                self.refresh().await
            }
            Err(error) => {
                self.phase.fail(error.user_message());
                Err(error)
            }
        }
    }

    /// Rejects a request. The reason is mandatory free text; an empty
    /// one is refused before any network call.
    pub async fn reject(&mut self, request_id: &str, reason: &str) -> Result<()> {
        if reason.trim().is_empty() {
            return Err(KitchensinkError::invalid_state(
                "a rejection reason is required",
            ));
        }
        self.phase.begin()?;
        match self.api.reject_request(request_id, reason).await {
            Ok(()) => {
                self.phase.succeed("Update request rejected");
                self.refresh().await
            }
            Err(error) => {
                self.phase.fail(error.user_message());
                Err(error)
            }
        }
    }
}
