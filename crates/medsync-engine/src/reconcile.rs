//! Batch linkage reconciliation.
//!
//! The orchestrator is the consistency backstop: every propagation
//! step elsewhere is individually idempotent, so a crash between a
//! primary write and its fan-out leaves a state these passes can
//! repair. Both passes are safe to re-run over an already-partially-
//! linked dataset; a single malformed row never blocks the rest of
//! the batch.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use medsync_core::error::MedsyncResult;
use medsync_core::matcher::{count_candidates, find_counterpart, find_counterpart_by_phone};
use medsync_core::models::patient::{CreatePatient, Patient, PatientStatus};
use medsync_core::models::user::{User, UserRole};
use medsync_core::repository::{
    Pagination, PatientRepository, StaffRepository, UserRepository,
};

use crate::service::LinkageService;

/// Summary of one patient/user reconciliation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkageReport {
    /// Patients created because no counterpart matched.
    pub patients_created: u64,
    /// Users whose forward pointer was written to an existing patient.
    pub users_linked: u64,
    /// Users whose deciding contact key matched more than one
    /// candidate; the first in creation order was picked.
    pub ambiguous_matches: u64,
    /// Per-record failures, with enough context to find the record.
    pub errors: Vec<String>,
}

/// Summary of one destructive staff relink pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StaffRelinkReport {
    /// Back-references cleared before rebuilding.
    pub links_cleared: u64,
    /// Staff re-linked to a user by normalized phone.
    pub staff_linked: u64,
    /// Staff with no phone match among current users.
    pub staff_unmatched: u64,
    /// Per-record failures.
    pub errors: Vec<String>,
}

enum LinkOutcome {
    /// Linked to an existing patient (which leaves the candidate pool).
    Linked(Uuid),
    Created,
}

impl<U: UserRepository, P: PatientRepository, S: StaffRepository> LinkageService<U, P, S> {
    /// Repair missing User→Patient links in bulk.
    ///
    /// For every `role = Patient` user with no forward pointer: find a
    /// matching unclaimed patient by phone/email and link it, or
    /// create a fresh patient record from the user's profile. Running
    /// twice with no intervening writes produces zero additional
    /// creations or links.
    pub async fn sync_existing_patients_and_users(&self) -> MedsyncResult<LinkageReport> {
        let mut report = LinkageReport::default();

        // Candidate pool: patients not already claimed by any user.
        let claimed = self.users.linked_patient_ids().await?;
        let mut pool: Vec<Patient> = self
            .collect_all_patients()
            .await?
            .into_iter()
            .filter(|p| !claimed.contains(&p.id))
            .collect();

        let mut offset = 0;
        loop {
            let page = self
                .users
                .list_by_role(
                    UserRole::Patient,
                    Pagination {
                        offset,
                        limit: self.config.batch_size,
                    },
                )
                .await?;
            let fetched = page.items.len() as u64;

            for user in &page.items {
                if user.patient_id.is_some() {
                    continue;
                }

                let candidates = count_candidates(user, &pool);
                if candidates > 1 {
                    warn!(
                        user_id = %user.id,
                        candidates,
                        "multiple patients match this user's contact keys, \
                         linking the first by creation order"
                    );
                    report.ambiguous_matches += 1;
                }

                match self.link_one(user, &pool).await {
                    Ok(LinkOutcome::Linked(patient_id)) => {
                        report.users_linked += 1;
                        pool.retain(|p| p.id != patient_id);
                    }
                    Ok(LinkOutcome::Created) => {
                        report.patients_created += 1;
                    }
                    Err(e) => {
                        // Isolate the failure; the batch continues.
                        report.errors.push(format!("user {}: {e}", user.id));
                    }
                }
            }

            if fetched < self.config.batch_size {
                break;
            }
            offset += fetched;
        }

        info!(
            patients_created = report.patients_created,
            users_linked = report.users_linked,
            ambiguous_matches = report.ambiguous_matches,
            error_count = report.errors.len(),
            "patient/user reconciliation pass complete"
        );
        Ok(report)
    }

    async fn link_one(&self, user: &User, pool: &[Patient]) -> MedsyncResult<LinkOutcome> {
        match find_counterpart(user, pool) {
            Some(patient) => {
                let patient_id = patient.id;
                self.users.set_patient_id(user.id, patient_id).await?;
                Ok(LinkOutcome::Linked(patient_id))
            }
            None => {
                let patient = self
                    .patients
                    .create(CreatePatient {
                        email: Some(user.email.clone()),
                        phone: user.phone.clone(),
                        status: if user.is_active {
                            PatientStatus::Active
                        } else {
                            PatientStatus::Inactive
                        },
                        name: user.first_name.clone(),
                        last_name: user.last_name.clone(),
                        address: user.address.clone(),
                    })
                    .await?;
                self.users.set_patient_id(user.id, patient.id).await?;
                Ok(LinkOutcome::Created)
            }
        }
    }

    /// Clear every `Staff.user_id`, then re-derive each link purely
    /// from the current normalized-phone match against users.
    ///
    /// Destructive-then-rebuild: the stored link is a materialized
    /// view of the contact fields, never authoritative input to its
    /// own recomputation. Stale or hand-curated links are erased.
    pub async fn relink_staff_to_users_by_phone(&self) -> MedsyncResult<StaffRelinkReport> {
        let mut report = StaffRelinkReport::default();

        report.links_cleared = self.staff.clear_user_links().await?;
        let users = self.collect_all_users().await?;

        let mut offset = 0;
        loop {
            let page = self
                .staff
                .list(Pagination {
                    offset,
                    limit: self.config.batch_size,
                })
                .await?;
            let fetched = page.items.len() as u64;

            for member in &page.items {
                match find_counterpart_by_phone(member, &users) {
                    Some(user) => match self.staff.set_user_link(member.id, Some(user.id)).await {
                        Ok(_) => report.staff_linked += 1,
                        Err(e) => report.errors.push(format!("staff {}: {e}", member.id)),
                    },
                    None => report.staff_unmatched += 1,
                }
            }

            if fetched < self.config.batch_size {
                break;
            }
            offset += fetched;
        }

        info!(
            links_cleared = report.links_cleared,
            staff_linked = report.staff_linked,
            staff_unmatched = report.staff_unmatched,
            error_count = report.errors.len(),
            "staff relink pass complete"
        );
        Ok(report)
    }
}
