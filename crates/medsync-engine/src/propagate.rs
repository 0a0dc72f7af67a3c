//! Per-request status and profile propagation.
//!
//! Invoked synchronously by the request handler that performed the
//! primary User mutation. Direction is one-way: User edits fan out to
//! the linked Patient, never the reverse. "This user isn't a patient"
//! is a normal case, not an error, so every missing counterpart is a
//! `None` no-op. The lookup-then-write pair is not transactional;
//! last-writer-wins is an accepted trade-off at this write frequency.

use tracing::warn;
use uuid::Uuid;

use medsync_core::error::{MedsyncError, MedsyncResult};
use medsync_core::models::patient::{Patient, PatientStatus, UpdatePatient};
use medsync_core::repository::{PatientRepository, StaffRepository, UserRepository};

use crate::service::LinkageService;

/// The bounded field subset a User mutation may push to its Patient.
///
/// Fields left as `None` are untouched on the counterpart — this is a
/// field-level merge, never a full overwrite.
#[derive(Debug, Clone, Default)]
pub struct UserProfilePatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl<U: UserRepository, P: PatientRepository, S: StaffRepository> LinkageService<U, P, S> {
    /// Mirror a user's active flag onto its linked patient's status.
    ///
    /// Returns the updated Patient, or `None` when the user has no
    /// patient link (or the link dangles). Store-level write failures
    /// surface to the caller.
    pub async fn sync_user_status_to_patient(
        &self,
        user_id: Uuid,
        is_active: bool,
    ) -> MedsyncResult<Option<Patient>> {
        let user = self.users.get_by_id(user_id).await?;
        let Some(patient_id) = user.patient_id else {
            return Ok(None);
        };

        let status = if is_active {
            PatientStatus::Active
        } else {
            PatientStatus::Inactive
        };

        match self
            .patients
            .update(
                patient_id,
                UpdatePatient {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await
        {
            Ok(patient) => Ok(Some(patient)),
            Err(MedsyncError::NotFound { .. }) => {
                // Dangling forward pointer; the orchestrator repairs it.
                warn!(%user_id, %patient_id, "user points at a missing patient");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Push edited profile fields from a user to its linked patient.
    ///
    /// Restricted to the shared subset (email, name, phone, address);
    /// the user's `first_name` maps to the patient's `name`. Same
    /// no-op semantics as [`Self::sync_user_status_to_patient`].
    pub async fn update_patient_from_user(
        &self,
        user_id: Uuid,
        patch: UserProfilePatch,
    ) -> MedsyncResult<Option<Patient>> {
        let user = self.users.get_by_id(user_id).await?;
        let Some(patient_id) = user.patient_id else {
            return Ok(None);
        };

        let update = UpdatePatient {
            email: patch.email.map(Some),
            phone: patch.phone.map(Some),
            status: None,
            name: patch.first_name,
            last_name: patch.last_name,
            address: patch.address.map(Some),
        };

        match self.patients.update(patient_id, update).await {
            Ok(patient) => Ok(Some(patient)),
            Err(MedsyncError::NotFound { .. }) => {
                warn!(%user_id, %patient_id, "user points at a missing patient");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
