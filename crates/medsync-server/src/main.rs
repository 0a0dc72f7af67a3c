//! MedSync Server — application entry point.
//!
//! `medsync-server sync` runs the two batch reconciliation passes.
//! This binary is the single admin trigger, which is what serializes
//! concurrent orchestrator runs.

use medsync_db::repository::{
    SurrealPatientRepository, SurrealStaffRepository, SurrealUserRepository,
};
use medsync_db::{DbConfig, DbManager};
use medsync_engine::LinkageService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("medsync=info".parse().unwrap()),
        )
        .json()
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "medsync-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = DbConfig::from_env();
    let manager = DbManager::connect(&config).await?;
    let db = manager.client().clone();

    medsync_db::run_migrations(&db).await?;

    match std::env::args().nth(1).as_deref() {
        Some("sync") => {
            let service = LinkageService::new(
                SurrealUserRepository::new(db.clone()),
                SurrealPatientRepository::new(db.clone()),
                SurrealStaffRepository::new(db),
            );

            let report = service.sync_existing_patients_and_users().await?;
            for error in &report.errors {
                tracing::warn!(%error, "reconciliation record failure");
            }
            tracing::info!(report = %serde_json::to_string(&report)?, "reconciliation report");

            let relink = service.relink_staff_to_users_by_phone().await?;
            for error in &relink.errors {
                tracing::warn!(%error, "staff relink record failure");
            }
            tracing::info!(report = %serde_json::to_string(&relink)?, "staff relink report");
        }
        Some(other) => {
            tracing::error!(command = other, "unknown command, expected 'sync'");
            std::process::exit(2);
        }
        None => {
            tracing::info!("migrations applied; run with 'sync' to reconcile linkage");
        }
    }

    Ok(())
}
