//! Update requests: server-tracked proposals to change one profile field.
//!
//! Created when a non-admin saves staged edits; an admin must approve or
//! reject each one, and the requester may revoke while still pending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review status of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Whether the request can still be acted on (approved, rejected,
    /// or revoked by its requester).
    pub fn is_actionable(self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

/// A server-owned update request, observed read-only by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub id: String,
    pub user_id: String,
    pub field_name: String,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    pub status: RequestStatus,
    pub requested_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_actionable_only_while_pending() {
        assert!(RequestStatus::Pending.is_actionable());
        assert!(!RequestStatus::Approved.is_actionable());
        assert!(!RequestStatus::Rejected.is_actionable());
    }

    #[test]
    fn test_deserializes_server_shape() {
        let json = r#"{
            "id": "r-1",
            "userId": "u-1",
            "fieldName": "name",
            "oldValue": "Old",
            "newValue": "New",
            "status": "REJECTED",
            "requestedAt": "2024-05-01T09:00:00Z",
            "reviewedAt": "2024-05-02T09:00:00Z",
            "rejectionReason": "Does not match ID proof"
        }"#;
        let request: UpdateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, RequestStatus::Rejected);
        assert_eq!(
            request.rejection_reason.as_deref(),
            Some("Does not match ID proof")
        );
    }
}
