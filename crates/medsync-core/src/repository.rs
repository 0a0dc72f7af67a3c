//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. The Entity Store behind these
//! traits is the only shared mutable resource in the system; the engine
//! never caches entity state across calls.

use uuid::Uuid;

use crate::error::MedsyncResult;
use crate::models::{
    patient::{CreatePatient, Patient, UpdatePatient},
    staff::{CreateStaff, Staff, UpdateStaff},
    user::{CreateUser, UpdateUser, User, UserRole},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = MedsyncResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = MedsyncResult<User>> + Send;
    /// Case-insensitive exact match; `None` when no user carries the email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = MedsyncResult<Option<User>>> + Send;
    /// The user (if any) whose forward pointer references the patient.
    fn find_by_patient_id(
        &self,
        patient_id: Uuid,
    ) -> impl Future<Output = MedsyncResult<Option<User>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = MedsyncResult<User>> + Send;
    /// Write the forward pointer to a patient record.
    fn set_patient_id(
        &self,
        id: Uuid,
        patient_id: Uuid,
    ) -> impl Future<Output = MedsyncResult<User>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = MedsyncResult<PaginatedResult<User>>> + Send;
    fn list_by_role(
        &self,
        role: UserRole,
        pagination: Pagination,
    ) -> impl Future<Output = MedsyncResult<PaginatedResult<User>>> + Send;
    /// All patient ids currently claimed by some user's forward pointer.
    fn linked_patient_ids(&self) -> impl Future<Output = MedsyncResult<Vec<Uuid>>> + Send;
}

pub trait PatientRepository: Send + Sync {
    fn create(&self, input: CreatePatient) -> impl Future<Output = MedsyncResult<Patient>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = MedsyncResult<Patient>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdatePatient,
    ) -> impl Future<Output = MedsyncResult<Patient>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = MedsyncResult<PaginatedResult<Patient>>> + Send;
}

pub trait StaffRepository: Send + Sync {
    fn create(&self, input: CreateStaff) -> impl Future<Output = MedsyncResult<Staff>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = MedsyncResult<Staff>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateStaff,
    ) -> impl Future<Output = MedsyncResult<Staff>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = MedsyncResult<PaginatedResult<Staff>>> + Send;
    /// Set or clear the back-reference to a user.
    fn set_user_link(
        &self,
        id: Uuid,
        user_id: Option<Uuid>,
    ) -> impl Future<Output = MedsyncResult<Staff>> + Send;
    /// Clear every staff back-reference; returns how many were set.
    fn clear_user_links(&self) -> impl Future<Output = MedsyncResult<u64>> + Send;
}
