//! MedSync Engine — identity linkage & consistency: batch
//! reconciliation, status/profile propagation, and account
//! provisioning over the `medsync-core` repository traits.

pub mod config;
pub mod error;
pub mod propagate;
pub mod provision;
pub mod reconcile;
pub mod service;

pub use config::ReconcileConfig;
pub use error::EngineError;
pub use propagate::UserProfilePatch;
pub use reconcile::{LinkageReport, StaffRelinkReport};
pub use service::LinkageService;
