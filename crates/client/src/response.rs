//! # Response Decoding
//!
//! Turns backend responses into typed values or [`ClinicError`]s. It is the
//! inverse of a server's error mapping: status codes and the JSON error
//! bodies the backend emits are mapped back onto the domain error enum.

use clinicdesk_core::errors::{ClinicError, ClinicResult};
use clinicdesk_core::validation::FieldErrors;
use eyre::WrapErr;
use reqwest::Response;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Single resources arrive either bare or wrapped in `{"data": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeWrapped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeWrapped<T> {
    fn into_inner(self) -> T {
        match self {
            MaybeWrapped::Wrapped { data } => data,
            MaybeWrapped::Bare(value) => value,
        }
    }
}

/// Error bodies seen from the backend, most specific first.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Fields { errors: FieldErrors },
    List { errors: Vec<String> },
    Single { error: String },
    Message { message: String },
}

/// Decodes a successful response body.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> ClinicResult<T> {
    let url = response.url().path().to_string();
    let body = response
        .text()
        .await
        .wrap_err_with(|| format!("Failed to read response body from {url}"))?;
    let value: MaybeWrapped<T> = serde_json::from_str(&body)
        .wrap_err_with(|| format!("Unexpected response body from {url}"))?;
    Ok(value.into_inner())
}

/// Decodes a paginated body; the envelope is never wrapped.
pub(crate) async fn decode_page<T: DeserializeOwned>(response: Response) -> ClinicResult<T> {
    let url = response.url().path().to_string();
    let body = response
        .text()
        .await
        .wrap_err_with(|| format!("Failed to read response body from {url}"))?;
    let value = serde_json::from_str(&body)
        .wrap_err_with(|| format!("Unexpected page body from {url}"))?;
    Ok(value)
}

/// Builds the error for a non-success response.
pub(crate) async fn error_from(response: Response) -> ClinicError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error_from_body(status.as_u16(), status.canonical_reason(), &body)
}

pub(crate) fn error_from_body(status: u16, reason: Option<&str>, body: &str) -> ClinicError {
    let fallback = || {
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed.starts_with('<') {
            reason.unwrap_or("Request failed").to_string()
        } else {
            trimmed.to_string()
        }
    };

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::Fields { errors }) if matches!(status, 400 | 422) && !errors.is_empty() => {
            ClinicError::Fields(errors)
        }
        Ok(ErrorBody::Fields { errors }) => ClinicError::from_status(status, errors.to_string()),
        Ok(ErrorBody::List { errors }) if !errors.is_empty() => {
            ClinicError::from_status(status, errors.join(", "))
        }
        Ok(ErrorBody::Single { error }) => ClinicError::from_status(status, error),
        Ok(ErrorBody::Message { message }) => ClinicError::from_status(status, message),
        _ => ClinicError::from_status(status, fallback()),
    }
}
