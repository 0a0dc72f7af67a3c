//! Reconciliation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for batch reconciliation passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Page size used when scanning users, patients, and staff.
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
}

fn default_batch_size() -> u64 {
    200
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}
