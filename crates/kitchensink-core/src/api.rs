//! API trait seams and wire payload types.
//!
//! The domain layer declares what it needs from the REST service; the
//! infrastructure crate provides the reqwest-backed implementation.
//! Application workflows depend only on these traits, which keeps them
//! testable against in-memory fakes.

use crate::error::Result;
use crate::profile::{Profile, Role};
use crate::session::AuthSession;
use crate::update_request::UpdateRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One field update inside a batched `PUT /profile/{userId}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUpdate {
    pub field_name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isd_code: Option<String>,
}

/// One page of a paginated admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }
}

/// Payload for `POST /admin/users` and `PUT /admin/users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isd_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Login endpoints (no bearer token attached).
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login/request-otp` — sends a login code to `email`.
    async fn request_login_otp(&self, email: &str) -> Result<()>;

    /// `POST /auth/login/verify` — exchanges the code for a session.
    async fn verify_login(&self, email: &str, otp: &str) -> Result<AuthSession>;
}

/// Profile endpoints for the viewed user.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// `GET /profile/{userId}`.
    async fn get_profile(&self, user_id: &str) -> Result<Profile>;

    /// `POST /profile/{userId}/email/request-otp` — returns the opaque
    /// `otpId` bound server-side to the new address.
    async fn request_email_otp(&self, user_id: &str, new_email: &str) -> Result<String>;

    /// `PUT /profile/{userId}` — batched field update. One HTTP call;
    /// the server decides per field whether to apply or raise a request.
    async fn update_fields(&self, user_id: &str, updates: &[FieldUpdate]) -> Result<()>;

    /// `GET /profile/{userId}/update-requests`.
    async fn list_update_requests(&self, user_id: &str) -> Result<Vec<UpdateRequest>>;

    /// `DELETE /profile/{userId}/update-requests/{id}` — revoke.
    async fn revoke_update_request(&self, user_id: &str, request_id: &str) -> Result<()>;
}

/// Admin console endpoints.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET /admin/users?page&size&sort`.
    async fn list_users(&self, page: u32, size: u32, sort: &str) -> Result<Page<Profile>>;

    /// `GET /admin/users/search?name=`.
    async fn search_users(&self, name: &str) -> Result<Vec<Profile>>;

    /// `POST /admin/users`.
    async fn create_user(&self, user: &UserPayload) -> Result<Profile>;

    /// `PUT /admin/users/{id}`.
    async fn update_user(&self, user_id: &str, user: &UserPayload) -> Result<Profile>;

    /// `DELETE /admin/users/{id}`.
    async fn delete_user(&self, user_id: &str) -> Result<()>;

    /// `GET /admin/update-requests` — the pending moderation queue.
    async fn list_pending_requests(&self) -> Result<Vec<UpdateRequest>>;

    /// `POST /admin/update-requests/{id}/approve` — no payload.
    async fn approve_request(&self, request_id: &str) -> Result<()>;

    /// `POST /admin/update-requests/{id}/reject` — reason is mandatory.
    async fn reject_request(&self, request_id: &str, reason: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_update_omits_absent_optionals() {
        let update = FieldUpdate {
            field_name: "name".into(),
            value: "Asha".into(),
            otp: None,
            isd_code: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"fieldName": "name", "value": "Asha"}));
    }

    #[test]
    fn test_field_update_carries_otp_and_isd() {
        let update = FieldUpdate {
            field_name: "email".into(),
            value: "new@example.com".into(),
            otp: Some("123456".into()),
            isd_code: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["otp"], "123456");
    }

    #[test]
    fn test_page_navigation() {
        let page = Page::<u8> {
            content: vec![],
            number: 1,
            total_pages: 3,
            total_elements: 25,
        };
        assert!(page.has_next());
        assert!(page.has_previous());
        let last = Page::<u8> {
            content: vec![],
            number: 2,
            total_pages: 3,
            total_elements: 25,
        };
        assert!(!last.has_next());
    }
}
