//! # ClinicDesk Client
//!
//! HTTP access to the clinic backend.
//!
//! ## Architecture
//!
//! - **Config**: environment-driven settings for the whole application
//! - **Api**: the [`api::ClinicApi`] trait every store depends on
//! - **Http**: the reqwest implementation with bearer authentication
//! - **Endpoints**: request paths
//! - **Response**: body decoding and error mapping
//! - **Session**: token storage and auth state notifications
//! - **Mock**: a mockall double of the API for tests

/// Configuration loaded from the environment
pub mod config;
/// The backend contract
pub mod api;
/// reqwest implementation of the contract
pub mod http;
/// Request paths
pub mod endpoints;
/// Response decoding and error mapping
mod response;
/// Token storage
pub mod session;

pub mod mock;

use std::sync::Arc;

pub use api::ClinicApi;
pub use http::HttpClinicApi;
pub use session::{AuthState, SessionHandle};

use clinicdesk_core::errors::ClinicResult;

/// Builds the HTTP client and its session handle from configuration.
///
/// # Example
///
/// ```no_run
/// # fn main() -> eyre::Result<()> {
/// let config = clinicdesk_client::config::ClientConfig::from_env()?;
/// let (api, session) = clinicdesk_client::connect(&config)?;
/// # Ok(())
/// # }
/// ```
pub fn connect(
    config: &config::ClientConfig,
) -> ClinicResult<(Arc<dyn ClinicApi>, SessionHandle)> {
    let session = SessionHandle::new();
    let api = HttpClinicApi::new(config.clone(), session.clone())?;
    Ok((Arc::new(api), session))
}
