//! # Client Configuration Module
//!
//! This module handles loading and managing configuration for the ClinicDesk
//! client. It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `CLINIC_API_URL`: Base URL of the clinic backend (required)
//! - `CLINIC_API_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `CLINIC_PAGE_SIZE`: Rows per page for list views (default: 10, max 100)
//! - `CLINIC_SEARCH_DEBOUNCE_MS`: Delay before a search is sent (default: 400)
//! - `CLINIC_EMAIL` / `CLINIC_PASSWORD`: Staff credentials used to sign in
//! - `LOG_LEVEL`: Logging level (default: "info")

use std::env;
use std::time::Duration;

use clinicdesk_core::models::auth::Credentials;
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

/// Configuration for the ClinicDesk client
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use clinicdesk_client::config::ClientConfig;
///
/// fn example() -> Result<()> {
///     let config = ClientConfig::from_env()?;
///     println!("Talking to {}", config.api_url);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash
    pub api_url: String,

    /// Request timeout
    pub request_timeout: Duration,

    /// Rows requested per page
    pub page_size: u32,

    /// Quiet period before a search request is issued
    pub search_debounce: Duration,

    /// Staff credentials (optional)
    pub credentials: Option<Credentials>,

    /// Log level for the application
    pub log_level: Level,
}

impl ClientConfig {
    /// Creates a new ClientConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `CLINIC_API_URL` is not set or is not an http(s) URL
    /// - `CLINIC_PAGE_SIZE` is not a number in 1..=100
    /// - only one of `CLINIC_EMAIL` / `CLINIC_PASSWORD` is set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Backend settings
        let api_url = lookup("CLINIC_API_URL")
            .ok_or_else(|| eyre!("CLINIC_API_URL environment variable must be set"))?;
        let api_url = api_url.trim().trim_end_matches('/').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(eyre!("CLINIC_API_URL must be an http(s) URL, got {api_url}"));
        }

        let request_timeout = lookup("CLINIC_API_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        // List settings
        let page_size: u32 = lookup("CLINIC_PAGE_SIZE")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .wrap_err("Invalid CLINIC_PAGE_SIZE value")?;
        if !(1..=100).contains(&page_size) {
            return Err(eyre!("CLINIC_PAGE_SIZE must be between 1 and 100"));
        }

        let search_debounce = lookup("CLINIC_SEARCH_DEBOUNCE_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(400);

        // Credentials
        let credentials = match (lookup("CLINIC_EMAIL"), lookup("CLINIC_PASSWORD")) {
            (Some(email), Some(password)) => Some(Credentials { email, password }),
            (None, None) => None,
            _ => {
                return Err(eyre!(
                    "CLINIC_EMAIL and CLINIC_PASSWORD must be set together"
                ));
            }
        };

        // Logging settings
        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(request_timeout),
            page_size,
            search_debounce: Duration::from_millis(search_debounce),
            credentials,
            log_level,
        })
    }

    /// Joins a request path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}
