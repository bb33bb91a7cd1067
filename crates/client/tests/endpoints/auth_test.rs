use axum::http::{Method, StatusCode};
use clinicdesk_client::{AuthState, ClinicApi};
use clinicdesk_core::{errors::ClinicError, models::auth::Credentials};
use serde_json::json;

use crate::test_utils::FakeBackend;

#[test_log::test(tokio::test)]
async fn test_login_returns_session_without_bearer() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::POST,
        "/api/v1/auth/login",
        StatusCode::OK,
        json!({
            "access_token": "abc",
            "refresh_token": "def",
            "user": {"id": 1, "email": "front@clinic.org", "name": "Front Desk"}
        }),
    );
    let (api, _session) = backend.client();

    let session = api
        .login(&Credentials {
            email: "front@clinic.org".into(),
            password: "secret".into(),
        })
        .await
        .expect("login should succeed");

    assert_eq!(session.access_token, "abc");
    assert_eq!(session.user.unwrap().name.as_deref(), Some("Front Desk"));

    let request = backend.last_request();
    assert_eq!(request.authorization, None);
    assert_eq!(
        request.body,
        Some(json!({"email": "front@clinic.org", "password": "secret"}))
    );
}

#[test_log::test(tokio::test)]
async fn test_requests_carry_bearer_token() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::GET,
        "/api/v1/admin/consultations/overview",
        StatusCode::OK,
        json!({"today": 3, "upcoming": 9, "completed": 40, "cancelled": 2}),
    );
    let (api, _session) = backend.signed_in_client().await;

    let overview = api.overview().await.unwrap();

    assert_eq!(overview.today, 3);
    assert_eq!(overview.no_show, 0);
    assert_eq!(
        backend.last_request().authorization.as_deref(),
        Some("Bearer token-123")
    );
}

#[test_log::test(tokio::test)]
async fn test_unauthorized_forces_logout() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::GET,
        "/api/v1/admin/patients/4",
        StatusCode::UNAUTHORIZED,
        json!({"error": "Token has expired"}),
    );
    let (api, session) = backend.signed_in_client().await;
    let mut state = session.subscribe();

    let err = api.get_patient(4).await.unwrap_err();

    assert!(matches!(err, ClinicError::Authentication(ref msg) if msg == "Token has expired"));
    assert_eq!(session.access_token().await, None);
    state.changed().await.unwrap();
    assert_eq!(*state.borrow(), AuthState::Expired);
}

#[test_log::test(tokio::test)]
async fn test_unreachable_backend_is_network_error() {
    let backend = FakeBackend::start().await;
    let mut config = backend.config();
    // Nothing listens on port 9 locally
    config.api_url = "http://127.0.0.1:9".into();
    let api = clinicdesk_client::HttpClinicApi::new(config, Default::default()).unwrap();

    let err = api.overview().await.unwrap_err();
    assert!(matches!(err, ClinicError::Network(_)));
}
