//! Linkage engine error types.

use medsync_core::error::MedsyncError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("patient {patient_id} already has a user account")]
    AccountExists { patient_id: Uuid },

    #[error("patient {patient_id} has no email address to provision a login from")]
    MissingEmail { patient_id: Uuid },
}

impl From<EngineError> for MedsyncError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::AccountExists { .. } => MedsyncError::AlreadyExists {
                entity: "user".into(),
            },
            EngineError::MissingEmail { .. } => MedsyncError::Validation {
                message: err.to_string(),
            },
        }
    }
}
