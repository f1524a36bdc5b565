//! Wire-level tests for the REST client against a mock server.

use kitchensink_core::api::{AdminApi, AuthApi, FieldUpdate, ProfileApi};
use kitchensink_core::profile::Role;
use kitchensink_core::session::AuthSession;
use kitchensink_infrastructure::{ClientConfig, RestClient, SessionStore};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        timeout_secs: 5,
    }
}

fn logged_in_store() -> SessionStore {
    let store = SessionStore::new();
    store.set(AuthSession {
        token: "tok-1".into(),
        user_id: "u-1".into(),
        role: Role::User,
        email: "asha@example.com".into(),
        name: "Asha".into(),
    });
    store
}

fn profile_json(user_id: &str) -> serde_json::Value {
    json!({
        "userId": user_id,
        "name": "Asha Rao",
        "email": "asha@example.com",
        "phoneNumber": "9123456789",
        "isdCode": "+91",
        "role": "USER",
        "registrationDate": "2024-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn attaches_api_key_bearer_and_correlation_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/u-1"))
        .and(header("X-API-Key", "test-key"))
        .and(header("Authorization", "Bearer tok-1"))
        .and(header_exists("X-Correlation-ID"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": profile_json("u-1")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::new(&config_for(&server), logged_in_store()).unwrap();
    let profile = client.get_profile("u-1").await.unwrap();
    assert_eq!(profile.name, "Asha Rao");
}

#[tokio::test]
async fn login_endpoints_work_without_a_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login/request-otp"))
        .and(body_json(json!({"email": "asha@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "message": "OTP sent"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login/verify"))
        .and(body_json(json!({"email": "asha@example.com", "otp": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "token": "tok-9",
                "userId": "u-1",
                "role": "ADMIN",
                "email": "asha@example.com",
                "name": "Asha"
            }
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(&config_for(&server), SessionStore::new()).unwrap();
    client.request_login_otp("asha@example.com").await.unwrap();
    let session = client.verify_login("asha@example.com", "123456").await.unwrap();
    assert_eq!(session.token, "tok-9");
    assert!(session.role.is_admin());
}

#[tokio::test]
async fn unauthorized_clears_session_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/u-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false, "message": "Token expired"
        })))
        .mount(&server)
        .await;

    let store = logged_in_store();
    let client = RestClient::new(&config_for(&server), store.clone()).unwrap();

    let error = client.get_profile("u-1").await.unwrap_err();
    assert!(error.is_unauthorized());
    assert!(!store.is_logged_in());

    // A second 401 still surfaces, but there is no session left to clear.
    let error = client.get_profile("u-1").await.unwrap_err();
    assert!(error.is_unauthorized());
}

#[tokio::test]
async fn forbidden_is_a_page_level_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/u-2"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false, "message": "Access denied"
        })))
        .mount(&server)
        .await;

    let store = logged_in_store();
    let client = RestClient::new(&config_for(&server), store.clone()).unwrap();
    let error = client.get_profile("u-2").await.unwrap_err();
    assert!(error.is_forbidden());
    // Unlike a 401, the session survives.
    assert!(store.is_logged_in());
}

#[tokio::test]
async fn server_field_map_becomes_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/profile/u-1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Validation failed",
            "data": {"phoneNumber": "Phone number already in use"}
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(&config_for(&server), logged_in_store()).unwrap();
    let updates = vec![FieldUpdate {
        field_name: "phoneNumber".into(),
        value: "9123456789".into(),
        otp: None,
        isd_code: Some("+91".into()),
    }];
    let error = client.update_fields("u-1", &updates).await.unwrap_err();
    let fields = error.field_errors().expect("validation error");
    assert_eq!(fields.get("phoneNumber"), Some("Phone number already in use"));
}

#[tokio::test]
async fn batched_update_sends_all_entries_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/profile/u-1"))
        .and(body_json(json!([
            {"fieldName": "name", "value": "Asha R"},
            {"fieldName": "phoneNumber", "value": "9123456789", "isdCode": "+91"}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "message": "2 update request(s) created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::new(&config_for(&server), logged_in_store()).unwrap();
    let updates = vec![
        FieldUpdate {
            field_name: "name".into(),
            value: "Asha R".into(),
            otp: None,
            isd_code: None,
        },
        FieldUpdate {
            field_name: "phoneNumber".into(),
            value: "9123456789".into(),
            otp: None,
            isd_code: Some("+91".into()),
        },
    ];
    client.update_fields("u-1", &updates).await.unwrap();
}

#[tokio::test]
async fn email_otp_request_returns_the_opaque_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/profile/u-1/email/request-otp"))
        .and(body_json(json!({"newEmail": "new@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "data": {"otpId": "otp-42"}
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(&config_for(&server), logged_in_store()).unwrap();
    let otp_id = client.request_email_otp("u-1", "new@example.com").await.unwrap();
    assert_eq!(otp_id, "otp-42");
}

#[tokio::test]
async fn admin_listing_decodes_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .and(query_param("sort", "name,asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "content": [profile_json("u-1"), profile_json("u-2")],
                "number": 0,
                "totalPages": 4,
                "totalElements": 37
            }
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(&config_for(&server), logged_in_store()).unwrap();
    let page = client.list_users(0, 10, "name,asc").await.unwrap();
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_elements, 37);
    assert!(page.has_next());
}

#[tokio::test]
async fn envelope_level_failure_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/update-requests/r-1/approve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false, "message": "Request already reviewed"
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(&config_for(&server), logged_in_store()).unwrap();
    let error = client.approve_request("r-1").await.unwrap_err();
    assert_eq!(error.to_string(), "API error (200): Request already reviewed");
}

#[tokio::test]
async fn connection_refused_maps_to_network_error() {
    let config = ClientConfig {
        // Port 1 is never listening.
        base_url: "http://127.0.0.1:1".to_string(),
        api_key: "test-key".to_string(),
        timeout_secs: 2,
    };
    let client = RestClient::new(&config, SessionStore::new()).unwrap();
    let error = client.get_profile("u-1").await.unwrap_err();
    assert!(error.is_network());
}
