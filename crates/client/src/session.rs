//! Token storage shared between the HTTP client and the auth store.

use std::sync::Arc;

use clinicdesk_core::models::auth::{Session, StaffUser};
use tokio::sync::{RwLock, watch};
use tracing::{info, warn};

/// Why the session is (or is not) present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    SignedOut,
    SignedIn,
    /// The backend rejected the token; the user must sign in again.
    Expired,
}

/// Cloneable handle to the current session.
///
/// Subscribers get notified on every transition, which is how views learn
/// about a forced logout.
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<RwLock<Option<Session>>>,
    state: Arc<watch::Sender<AuthState>>,
}

impl Default for SessionHandle {
    fn default() -> Self {
        let (state, _) = watch::channel(AuthState::SignedOut);
        Self {
            session: Arc::new(RwLock::new(None)),
            state: Arc::new(state),
        }
    }
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, session: Session) {
        *self.session.write().await = Some(session);
        self.state.send_replace(AuthState::SignedIn);
        info!("Session started");
    }

    pub async fn clear(&self) {
        *self.session.write().await = None;
        self.state.send_replace(AuthState::SignedOut);
    }

    /// Drops the tokens after the backend answered 401.
    pub async fn expire(&self) {
        let had_session = self.session.write().await.take().is_some();
        if had_session {
            warn!("Session rejected by server, signing out");
            self.state.send_replace(AuthState::Expired);
        }
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub async fn user(&self) -> Option<StaffUser> {
        self.session.read().await.as_ref().and_then(|s| s.user.clone())
    }

    pub fn state(&self) -> AuthState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
