use std::sync::Arc;

use clinicdesk_client::{AuthState, ClinicApi, SessionHandle};
use clinicdesk_core::errors::{ClinicError, ClinicResult};
use clinicdesk_core::models::auth::{Credentials, StaffUser};
use clinicdesk_core::validation::{self, FieldErrors};
use tokio::sync::watch;
use tracing::{info, warn};

/// Sign-in state of the staff member using the application.
pub struct AuthStore {
    api: Arc<dyn ClinicApi>,
    session: SessionHandle,
}

impl AuthStore {
    pub fn new(api: Arc<dyn ClinicApi>, session: SessionHandle) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, credentials: &Credentials) -> ClinicResult<Option<StaffUser>> {
        let mut errors = FieldErrors::new();
        if !validation::is_valid_email(&credentials.email) {
            errors.add("email", "is invalid");
        }
        validation::require(&mut errors, "password", &credentials.password);
        errors.into_result()?;

        let session = self.api.login(credentials).await.map_err(|err| match err {
            ClinicError::Authentication(_) => {
                ClinicError::Validation("Invalid email or password".to_string())
            }
            other => other,
        })?;
        let user = session.user.clone();
        self.session.set(session).await;
        info!(email = %credentials.email, "Signed in");
        Ok(user)
    }

    /// Ends the session locally even when the backend call fails.
    pub async fn logout(&self) -> ClinicResult<()> {
        let result = self.api.logout().await;
        self.session.clear().await;
        match result {
            // Token already rejected; the local sign-out is all that was needed.
            Err(ClinicError::Authentication(_)) => Ok(()),
            Err(err) => {
                warn!(error = %err, "Logout request failed");
                Err(err)
            }
            Ok(()) => {
                info!("Signed out");
                Ok(())
            }
        }
    }

    pub fn state(&self) -> AuthState {
        self.session.state()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state() == AuthState::SignedIn
    }

    pub async fn current_user(&self) -> Option<StaffUser> {
        self.session.user().await
    }

    /// Notified on every transition, including forced logouts.
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.session.subscribe()
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }
}
