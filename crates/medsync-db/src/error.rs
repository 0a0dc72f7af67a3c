//! Database-specific error types and conversions.

use medsync_core::error::MedsyncError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique index violated: {entity}")]
    UniqueViolation { entity: String },

    #[error("Invalid stored data: {0}")]
    Decode(String),

    #[error("Password hashing failed: {0}")]
    Crypto(String),
}

impl From<DbError> for MedsyncError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => MedsyncError::NotFound { entity, id },
            DbError::UniqueViolation { entity } => MedsyncError::AlreadyExists { entity },
            DbError::Decode(msg) => MedsyncError::Internal(msg),
            DbError::Crypto(msg) => MedsyncError::Crypto(msg),
            other => MedsyncError::Database(other.to_string()),
        }
    }
}
