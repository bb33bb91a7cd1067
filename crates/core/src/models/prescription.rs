use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ClinicResult;
use crate::validation::{self, FieldErrors};

/// Free-form key/value clinical note attached to a consultation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionNote {
    pub id: i64,
    pub consultation_id: i64,
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub key: String,
    pub value: String,
}

impl NoteInput {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn validate(&self) -> ClinicResult<()> {
        let mut errors = FieldErrors::new();
        validation::require(&mut errors, "key", &self.key);
        errors.into_result()
    }
}
