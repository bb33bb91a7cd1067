use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid fields: {0}")]
    Fields(FieldErrors),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] eyre::Report),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ClinicError {
    /// Maps an HTTP status and the message extracted from the response body
    /// to the matching error variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => ClinicError::Validation(message),
            401 => ClinicError::Authentication(message),
            403 => ClinicError::Authorization(message),
            404 => ClinicError::NotFound(message),
            409 => ClinicError::Conflict(message),
            _ => ClinicError::Api { status, message },
        }
    }

    /// Text shown inline or in a toast. Field errors keep their per-field
    /// messages; everything else collapses to a single sentence.
    pub fn user_message(&self) -> String {
        match self {
            ClinicError::NotFound(msg)
            | ClinicError::Validation(msg)
            | ClinicError::Conflict(msg) => msg.clone(),
            ClinicError::Fields(fields) => fields.to_string(),
            ClinicError::Authentication(_) => "Your session has expired. Please sign in again.".to_string(),
            ClinicError::Authorization(_) => "You are not allowed to perform this action.".to_string(),
            ClinicError::Api { message, .. } => message.clone(),
            ClinicError::Network(_) => "Unable to reach the clinic server.".to_string(),
            ClinicError::Cancelled => "Request was superseded.".to_string(),
            ClinicError::Internal(_) => "Something went wrong.".to_string(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClinicError::Authentication(_))
    }
}

impl From<FieldErrors> for ClinicError {
    fn from(fields: FieldErrors) -> Self {
        ClinicError::Fields(fields)
    }
}

pub type ClinicResult<T> = Result<T, ClinicError>;
