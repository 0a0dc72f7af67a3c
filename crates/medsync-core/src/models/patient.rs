//! Patient domain model — the clinical/demographic record.
//!
//! Created independently of any portal account (front-desk intake
//! usually precedes self-registration), so email and phone carry no
//! uniqueness guarantee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PatientStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: PatientStatus,
    pub name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatient {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: PatientStatus,
    pub name: String,
    pub last_name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdatePatient {
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub status: Option<PatientStatus>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<Option<String>>,
}
