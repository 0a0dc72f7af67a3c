//! Account provisioning — derive a User login from an existing
//! Patient.
//!
//! This is the only path that sets the forward pointer at creation
//! time; all other linkage is established post hoc by the
//! reconciliation passes. Identity fields are copied once at creation;
//! ongoing consistency is the propagator's job.

use tracing::info;
use uuid::Uuid;

use medsync_core::error::MedsyncResult;
use medsync_core::models::patient::Patient;
use medsync_core::models::user::{CreateUser, User, UserRole};
use medsync_core::repository::{PatientRepository, StaffRepository, UserRepository};

use crate::error::EngineError;
use crate::service::LinkageService;

impl<U: UserRepository, P: PatientRepository, S: StaffRepository> LinkageService<U, P, S> {
    /// Whether any user's forward pointer already claims this patient.
    pub async fn has_user_account(&self, patient_id: Uuid) -> MedsyncResult<bool> {
        Ok(self.users.find_by_patient_id(patient_id).await?.is_some())
    }

    /// Create a portal login for an existing patient.
    ///
    /// Rejects with a conflict when the patient already has an
    /// account, and with a validation error when the patient has no
    /// email (the email is the login identity). The raw credential is
    /// hashed at the persistence edge and never echoed back; an
    /// email-uniqueness violation surfaces as a conflict, never
    /// auto-retried.
    pub async fn create_user_from_patient(
        &self,
        patient: &Patient,
        password: &str,
    ) -> MedsyncResult<User> {
        if self.has_user_account(patient.id).await? {
            return Err(EngineError::AccountExists {
                patient_id: patient.id,
            }
            .into());
        }

        let email = patient
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(EngineError::MissingEmail {
                patient_id: patient.id,
            })?;

        let user = self
            .users
            .create(CreateUser {
                email: email.to_string(),
                phone: patient.phone.clone(),
                role: UserRole::Patient,
                password: password.to_string(),
                patient_id: Some(patient.id),
                first_name: patient.name.clone(),
                last_name: patient.last_name.clone(),
                address: patient.address.clone(),
            })
            .await?;

        info!(patient_id = %patient.id, user_id = %user.id, "provisioned user from patient");
        Ok(user)
    }
}
