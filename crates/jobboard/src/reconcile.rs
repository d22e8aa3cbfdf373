//! Reconciliation sweep: backfills the default position onto jobs that
//! ended up without any.
//!
//! Converges in one pass. A second sweep finds no orphans and repairs
//! nothing.

use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::association::AssociationManager;
use crate::canonical::{normalize, DEFAULT_POSITION};
use crate::db::Database;
use crate::error::{AssociationError, JobboardError};
use crate::registry::PositionRegistry;

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Jobs found without positions.
    pub orphans_found: usize,
    /// Jobs linked to the default position by this sweep.
    pub repaired: usize,
    /// One entry per orphan that could not be linked.
    pub failures: Vec<String>,
}

#[derive(Clone)]
pub struct Reconciler {
    registry: PositionRegistry,
    associations: AssociationManager,
    default_position: String,
}

impl Reconciler {
    pub fn new(db: Database) -> Self {
        Self {
            registry: PositionRegistry::new(db.clone()),
            associations: AssociationManager::new(db),
            default_position: DEFAULT_POSITION.to_string(),
        }
    }

    /// Overrides the position orphans are linked to. The name is
    /// canonicalized like any other label.
    pub fn with_default_position(mut self, name: impl AsRef<str>) -> Self {
        self.default_position = normalize(name.as_ref());
        self
    }

    /// Canonical name of the position orphans are linked to.
    pub fn default_position(&self) -> &str {
        &self.default_position
    }

    /// Links every orphan job to the default position.
    ///
    /// Failing to find orphans or to resolve the default position aborts the
    /// sweep. A single orphan that fails to link is logged and skipped.
    pub fn sweep(&self) -> Result<SweepReport, JobboardError> {
        let _span = info_span!("sweep", default_position = %self.default_position).entered();

        let orphans = self.associations.orphan_jobs()?;
        let mut report = SweepReport {
            orphans_found: orphans.len(),
            ..Default::default()
        };
        if orphans.is_empty() {
            info!("no jobs without positions");
            return Ok(report);
        }

        warn!(count = orphans.len(), "jobs without positions found");
        let default = self.registry.resolve(&self.default_position)?;

        for job in &orphans {
            match self.associations.link(job.id, [default.id]) {
                Ok(_) => {
                    report.repaired += 1;
                    info!(job_id = job.id, position = %default.name, "assigned default position");
                }
                Err(e) => {
                    warn!(job_id = job.id, error = %e, "failed to assign default position");
                    report.failures.push(e.to_string());
                }
            }
        }

        Ok(report)
    }

    /// Deletes every association row, leaving jobs, companies and positions.
    pub fn reset_associations(&self) -> Result<usize, AssociationError> {
        let removed = self.associations.clear_all()?;
        info!(removed, "cleared all job positions");
        Ok(removed)
    }
}
