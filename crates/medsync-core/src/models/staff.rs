//! Staff domain model — the employment record.
//!
//! `user_id` is derived state: the relink pass treats it as a
//! materialized view recomputable from contact fields at any time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StaffStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Back-reference to the staff member's login identity.
    pub user_id: Option<Uuid>,
    pub status: StaffStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStaff {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub user_id: Option<Uuid>,
    pub status: StaffStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateStaff {
    pub name: Option<String>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub user_id: Option<Option<Uuid>>,
    pub status: Option<StaffStatus>,
}
