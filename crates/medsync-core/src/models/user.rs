//! User domain model — the login identity.
//!
//! Identity fields (email, credential, role, active flag) are owned by
//! the User; `patient_id` is the forward pointer that links a portal
//! account to its clinical record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Doctor,
    Receptionist,
    Patient,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Unique, stored lowercased for case-insensitive comparison.
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    /// At most one User points at a given Patient. A `role = Patient`
    /// user without this set is a reconcilable state, not corruption.
    pub patient_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    /// Raw password (hashed with Argon2id before storage).
    pub password: String,
    pub patient_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub phone: Option<Option<String>>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub patient_id: Option<Option<Uuid>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<Option<String>>,
}
