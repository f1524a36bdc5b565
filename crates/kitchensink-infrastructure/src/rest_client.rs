//! Reqwest-backed implementation of the core API traits.
//!
//! Every request carries the static API key, a stable correlation ID,
//! and the bearer token when a session exists. Responses are unwrapped
//! from the `{ success, data, message }` envelope; error statuses are
//! mapped onto the client error taxonomy, and a 401 tears the cached
//! session down before surfacing.

use crate::config::ClientConfig;
use crate::dto::{Envelope, ErrorEnvelope, OtpIssued};
use crate::session_store::SessionStore;
use async_trait::async_trait;
use kitchensink_core::api::{AdminApi, AuthApi, FieldUpdate, Page, ProfileApi, UserPayload};
use kitchensink_core::error::{KitchensinkError, Result};
use kitchensink_core::profile::Profile;
use kitchensink_core::session::AuthSession;
use kitchensink_core::update_request::UpdateRequest;
use kitchensink_core::validation::FieldErrors;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// REST client for the Kitchensink service.
///
/// Cheap to clone; clones share the underlying connection pool and the
/// session store.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    api_key: String,
    /// Stable per-client correlation ID, `client-<uuid>` format.
    correlation_id: String,
    session: SessionStore,
}

impl RestClient {
    /// Creates a client from configuration and a shared session store.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KitchensinkError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            correlation_id: format!("client-{}", uuid::Uuid::new_v4()),
            session,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header("X-API-Key", &self.api_key)
            .header("X-Correlation-ID", &self.correlation_id);
        if let Some(session) = self.session.get() {
            builder = builder.bearer_auth(session.token);
        }
        builder
    }

    /// Sends a request and unwraps the envelope, returning its `data`.
    async fn execute<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T> {
        self.dispatch::<T>(builder)
            .await?
            .ok_or_else(|| KitchensinkError::decode("Response envelope carried no data"))
    }

    /// Sends a request where the response data, if any, is ignored.
    async fn execute_unit(&self, builder: reqwest::RequestBuilder) -> Result<()> {
        self.dispatch::<serde_json::Value>(builder).await.map(|_| ())
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Option<T>> {
        let response = builder.send().await.map_err(|e| {
            tracing::debug!("Transport failure: {}", e);
            KitchensinkError::network(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| KitchensinkError::network(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            // Idempotent: only the first 401 of a burst logs the teardown.
            if self.session.clear() {
                tracing::warn!("Received 401, cleared cached session");
            }
            return Err(KitchensinkError::Unauthorized);
        }
        if !status.is_success() {
            return Err(map_failure(status, &body));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| KitchensinkError::decode(format!("Invalid response envelope: {e}")))?;
        if !envelope.success {
            return Err(KitchensinkError::api(
                status.as_u16(),
                envelope
                    .message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ));
        }
        Ok(envelope.data)
    }
}

/// Maps a non-401 error status onto the error taxonomy.
fn map_failure(status: StatusCode, body: &str) -> KitchensinkError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or(ErrorEnvelope {
        message: None,
        data: None,
    });
    let message = envelope
        .message
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

    if status == StatusCode::FORBIDDEN {
        return KitchensinkError::Forbidden(message);
    }
    // Server-side validation answers with a field→message map in `data`;
    // redistribute it into the same per-field shape as local validation.
    if let Some(serde_json::Value::Object(map)) = envelope.data {
        let fields: FieldErrors = map
            .into_iter()
            .filter_map(|(field, value)| value.as_str().map(|msg| (field, msg.to_string())))
            .collect();
        if !fields.is_empty() {
            return KitchensinkError::Validation(fields);
        }
    }
    KitchensinkError::api(status.as_u16(), message)
}

#[async_trait]
impl AuthApi for RestClient {
    async fn request_login_otp(&self, email: &str) -> Result<()> {
        tracing::debug!("Requesting login OTP for {}", email);
        let builder = self
            .request(Method::POST, "/auth/login/request-otp")
            .json(&json!({ "email": email }));
        self.execute_unit(builder).await
    }

    async fn verify_login(&self, email: &str, otp: &str) -> Result<AuthSession> {
        let builder = self
            .request(Method::POST, "/auth/login/verify")
            .json(&json!({ "email": email, "otp": otp }));
        self.execute(builder).await
    }
}

#[async_trait]
impl ProfileApi for RestClient {
    async fn get_profile(&self, user_id: &str) -> Result<Profile> {
        let builder = self.request(Method::GET, &format!("/profile/{user_id}"));
        self.execute(builder).await
    }

    async fn request_email_otp(&self, user_id: &str, new_email: &str) -> Result<String> {
        let builder = self
            .request(Method::POST, &format!("/profile/{user_id}/email/request-otp"))
            .json(&json!({ "newEmail": new_email }));
        let issued: OtpIssued = self.execute(builder).await?;
        Ok(issued.otp_id)
    }

    async fn update_fields(&self, user_id: &str, updates: &[FieldUpdate]) -> Result<()> {
        tracing::debug!("Submitting {} field update(s) for {}", updates.len(), user_id);
        let builder = self
            .request(Method::PUT, &format!("/profile/{user_id}"))
            .json(updates);
        self.execute_unit(builder).await
    }

    async fn list_update_requests(&self, user_id: &str) -> Result<Vec<UpdateRequest>> {
        let builder = self.request(Method::GET, &format!("/profile/{user_id}/update-requests"));
        self.execute(builder).await
    }

    async fn revoke_update_request(&self, user_id: &str, request_id: &str) -> Result<()> {
        let builder = self.request(
            Method::DELETE,
            &format!("/profile/{user_id}/update-requests/{request_id}"),
        );
        self.execute_unit(builder).await
    }
}

#[async_trait]
impl AdminApi for RestClient {
    async fn list_users(&self, page: u32, size: u32, sort: &str) -> Result<Page<Profile>> {
        let builder = self
            .request(Method::GET, "/admin/users")
            .query(&[("page", page.to_string()), ("size", size.to_string())])
            .query(&[("sort", sort)]);
        self.execute(builder).await
    }

    async fn search_users(&self, name: &str) -> Result<Vec<Profile>> {
        let builder = self
            .request(Method::GET, "/admin/users/search")
            .query(&[("name", name)]);
        self.execute(builder).await
    }

    async fn create_user(&self, user: &UserPayload) -> Result<Profile> {
        let builder = self.request(Method::POST, "/admin/users").json(user);
        self.execute(builder).await
    }

    async fn update_user(&self, user_id: &str, user: &UserPayload) -> Result<Profile> {
        let builder = self
            .request(Method::PUT, &format!("/admin/users/{user_id}"))
            .json(user);
        self.execute(builder).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("/admin/users/{user_id}"));
        self.execute_unit(builder).await
    }

    async fn list_pending_requests(&self) -> Result<Vec<UpdateRequest>> {
        let builder = self.request(Method::GET, "/admin/update-requests");
        self.execute(builder).await
    }

    async fn approve_request(&self, request_id: &str) -> Result<()> {
        let builder = self.request(Method::POST, &format!("/admin/update-requests/{request_id}/approve"));
        self.execute_unit(builder).await
    }

    async fn reject_request(&self, request_id: &str, reason: &str) -> Result<()> {
        let builder = self
            .request(Method::POST, &format!("/admin/update-requests/{request_id}/reject"))
            .json(&json!({ "reason": reason }));
        self.execute_unit(builder).await
    }
}
