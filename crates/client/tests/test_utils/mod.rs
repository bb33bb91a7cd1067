use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use clinicdesk_client::{HttpClinicApi, SessionHandle, config::ClientConfig};
use clinicdesk_core::models::auth::Session;
use serde_json::Value;
use tokio::net::TcpListener;

/// A request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeState {
    responses: Mutex<HashMap<(Method, String), (StatusCode, Value)>>,
    requests: Mutex<Vec<Recorded>>,
}

/// In-process backend: every route answers with the canned response
/// registered for its method and path, 404 otherwise.
pub struct FakeBackend {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .fallback(respond)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn on(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }

    pub fn config(&self) -> ClientConfig {
        let base_url = self.base_url.clone();
        ClientConfig::from_lookup(move |key| match key {
            "CLINIC_API_URL" => Some(base_url.clone()),
            _ => None,
        })
        .unwrap()
    }

    pub fn client(&self) -> (HttpClinicApi, SessionHandle) {
        let session = SessionHandle::new();
        let api = HttpClinicApi::new(self.config(), session.clone()).unwrap();
        (api, session)
    }

    pub async fn signed_in_client(&self) -> (HttpClinicApi, SessionHandle) {
        let (api, session) = self.client();
        session
            .set(Session {
                access_token: "token-123".into(),
                refresh_token: None,
                user: None,
            })
            .await;
        (api, session)
    }
}

async fn respond(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).ok(),
    });

    let canned = state.responses.lock().unwrap().get(&(method, path)).cloned();
    match canned {
        Some((status, Value::Null)) => status.into_response(),
        Some((status, value)) => (status, Json(value)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "No such route" })),
        )
            .into_response(),
    }
}
