//! The linkage service — construction and shared scan helpers.

use medsync_core::error::MedsyncResult;
use medsync_core::models::{patient::Patient, user::User};
use medsync_core::repository::{
    Pagination, PatientRepository, StaffRepository, UserRepository,
};

use crate::config::ReconcileConfig;

/// Identity linkage & consistency engine.
///
/// Generic over repository implementations so the engine has no
/// dependency on the database crate. Runs entirely inside the calling
/// request or batch invocation; never caches entity state across
/// calls.
pub struct LinkageService<U: UserRepository, P: PatientRepository, S: StaffRepository> {
    pub(crate) users: U,
    pub(crate) patients: P,
    pub(crate) staff: S,
    pub(crate) config: ReconcileConfig,
}

impl<U: UserRepository, P: PatientRepository, S: StaffRepository> LinkageService<U, P, S> {
    pub fn new(users: U, patients: P, staff: S) -> Self {
        Self::with_config(users, patients, staff, ReconcileConfig::default())
    }

    pub fn with_config(users: U, patients: P, staff: S, config: ReconcileConfig) -> Self {
        Self {
            users,
            patients,
            staff,
            config,
        }
    }

    /// Page through every patient record.
    pub(crate) async fn collect_all_patients(&self) -> MedsyncResult<Vec<Patient>> {
        let mut all = Vec::new();
        let mut offset = 0;
        loop {
            let page = self
                .patients
                .list(Pagination {
                    offset,
                    limit: self.config.batch_size,
                })
                .await?;
            let fetched = page.items.len() as u64;
            all.extend(page.items);
            if fetched < self.config.batch_size {
                return Ok(all);
            }
            offset += fetched;
        }
    }

    /// Page through every user record.
    pub(crate) async fn collect_all_users(&self) -> MedsyncResult<Vec<User>> {
        let mut all = Vec::new();
        let mut offset = 0;
        loop {
            let page = self
                .users
                .list(Pagination {
                    offset,
                    limit: self.config.batch_size,
                })
                .await?;
            let fetched = page.items.len() as u64;
            all.extend(page.items);
            if fetched < self.config.batch_size {
                return Ok(all);
            }
            offset += fetched;
        }
    }
}
