use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ClinicResult;
use crate::validation::{self, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Active,
    Inactive,
}

impl PatientStatus {
    pub fn toggled(self) -> Self {
        match self {
            PatientStatus::Active => PatientStatus::Inactive,
            PatientStatus::Inactive => PatientStatus::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    pub status: PatientStatus,
    #[serde(default)]
    pub appointments_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == PatientStatus::Active
    }
}

/// Compact patient reference embedded in consultations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl PatientSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NewPatient {
    pub fn validate(&self, today: NaiveDate) -> ClinicResult<()> {
        let mut errors = FieldErrors::new();
        validation::require(&mut errors, "first_name", &self.first_name);
        validation::require(&mut errors, "last_name", &self.last_name);
        if !validation::is_valid_email(&self.email) {
            errors.add("email", "is invalid");
        }
        if !validation::is_valid_phone(&self.phone) {
            errors.add("phone", "is invalid");
        }
        if self.date_of_birth.is_some_and(|dob| dob > today) {
            errors.add("date_of_birth", "can't be in the future");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PatientStatus>,
}

impl PatientUpdate {
    pub fn status(status: PatientStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Only the fields present in the update are checked.
    pub fn validate(&self, today: NaiveDate) -> ClinicResult<()> {
        let mut errors = FieldErrors::new();
        if let Some(first_name) = &self.first_name {
            validation::require(&mut errors, "first_name", first_name);
        }
        if let Some(last_name) = &self.last_name {
            validation::require(&mut errors, "last_name", last_name);
        }
        if self.email.as_deref().is_some_and(|e| !validation::is_valid_email(e)) {
            errors.add("email", "is invalid");
        }
        if self.phone.as_deref().is_some_and(|p| !validation::is_valid_phone(p)) {
            errors.add("phone", "is invalid");
        }
        if self.date_of_birth.is_some_and(|dob| dob > today) {
            errors.add("date_of_birth", "can't be in the future");
        }
        errors.into_result()
    }

    /// Applies the present fields onto a cached patient.
    pub fn apply_to(&self, patient: &mut Patient) {
        if let Some(v) = &self.first_name {
            patient.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            patient.last_name = v.clone();
        }
        if let Some(v) = &self.email {
            patient.email = v.clone();
        }
        if let Some(v) = &self.phone {
            patient.phone = v.clone();
        }
        if let Some(v) = &self.gender {
            patient.gender = Some(v.clone());
        }
        if let Some(v) = self.date_of_birth {
            patient.date_of_birth = Some(v);
        }
        if let Some(v) = &self.address {
            patient.address = Some(v.clone());
        }
        if let Some(v) = self.status {
            patient.status = v;
        }
    }
}

/// Query for the paginated patient list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PatientStatus>,
}
