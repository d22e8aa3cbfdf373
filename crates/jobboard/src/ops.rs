//! Operational triggers: the synchronous calls an admin surface exposes.
//!
//! Each trigger returns an [`OperationOutcome`]. Fatal failures become
//! `success = false` with a short description; partial success is success.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::{stats_repo, Database};
use crate::reconcile::Reconciler;
use crate::reset::reset_all_and_request_reseed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    pub success: bool,
    pub message: String,
    pub counts: BTreeMap<String, u64>,
}

impl OperationOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            counts: BTreeMap::new(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            counts: BTreeMap::new(),
        }
    }

    fn with_count(mut self, key: &str, value: impl TryInto<u64>) -> Self {
        self.counts
            .insert(key.to_string(), value.try_into().unwrap_or(u64::MAX));
        self
    }
}

pub struct Operations {
    db: Database,
    reconciler: Reconciler,
    production: bool,
}

impl Operations {
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            reconciler: Reconciler::new(db.clone())
                .with_default_position(&config.default_position),
            production: config.is_production(),
            db,
        }
    }

    /// Deletes every job ↔ position link.
    pub fn reset_associations(&self) -> OperationOutcome {
        match self.reconciler.reset_associations() {
            Ok(removed) => OperationOutcome::ok(format!("Removed {} job position links", removed))
                .with_count("removed", removed),
            Err(e) => {
                error!(error = %e, "reset associations failed");
                OperationOutcome::failed(format!("Failed to reset associations: {}", e))
            }
        }
    }

    /// Links every job without positions to the default position.
    pub fn fix_missing_positions(&self) -> OperationOutcome {
        match self.reconciler.sweep() {
            Ok(report) => {
                let message = if report.orphans_found == 0 {
                    "All jobs have positions".to_string()
                } else {
                    format!(
                        "Assigned the default position to {} of {} jobs",
                        report.repaired, report.orphans_found
                    )
                };
                OperationOutcome::ok(message)
                    .with_count("orphansFound", report.orphans_found)
                    .with_count("repaired", report.repaired)
                    .with_count("failed", report.failures.len())
            }
            Err(e) => {
                error!(error = %e, "sweep failed");
                OperationOutcome::failed(format!("Failed to fix missing positions: {}", e))
            }
        }
    }

    /// Empties the dataset and flags a re-seed for the next startup.
    ///
    /// Refused in production.
    pub fn reset_and_flag_reseed(&self) -> OperationOutcome {
        if self.production {
            warn!("destructive reset refused in production");
            return OperationOutcome::failed("Destructive reset is disabled in production");
        }

        let report = match reset_all_and_request_reseed(&self.db) {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, "destructive reset failed");
                return OperationOutcome::failed(format!("Failed to reset data: {}", e));
            }
        };

        info!("dataset reset, re-seed requested for next startup");
        OperationOutcome::ok("All data deleted; the dataset will be re-seeded on next startup")
            .with_count("associations", report.associations)
            .with_count("jobs", report.jobs)
            .with_count("companies", report.companies)
            .with_count("positions", report.positions)
    }

    /// Current dataset counts.
    pub fn stats(&self) -> OperationOutcome {
        match stats_repo::snapshot(&self.db) {
            Ok(stats) => {
                let mut outcome = OperationOutcome::ok(format!(
                    "{} jobs across {} companies, {} positions",
                    stats.jobs, stats.companies, stats.positions
                ))
                .with_count("companies", stats.companies)
                .with_count("jobs", stats.jobs)
                .with_count("positions", stats.positions)
                .with_count("associations", stats.associations)
                .with_count("orphanJobs", stats.orphan_jobs);
                for stat in stats.by_position {
                    outcome = outcome.with_count(&format!("position:{}", stat.name), stat.job_count);
                }
                outcome
            }
            Err(e) => OperationOutcome::failed(format!("Failed to collect statistics: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::db::flag_repo;
    use crate::seed::{SeedCompany, SeedDocument, SeedJobPosting, Seeder};

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        let doc = SeedDocument {
            companies: vec![SeedCompany {
                name: "Acme".to_string(),
                job_postings: vec![SeedJobPosting {
                    title: "Full-Stack Role".to_string(),
                    positions: vec!["frontend developer".to_string(), "backend developer".to_string()],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        };
        Seeder::new(db.clone()).seed(&doc).unwrap();
        db
    }

    #[test]
    fn test_reset_then_fix() {
        let db = seeded();
        let ops = Operations::new(db, &Config::default());

        let outcome = ops.reset_associations();
        assert!(outcome.success);
        assert_eq!(outcome.counts["removed"], 2);

        let outcome = ops.fix_missing_positions();
        assert!(outcome.success);
        assert_eq!(outcome.counts["repaired"], 1);

        let outcome = ops.fix_missing_positions();
        assert!(outcome.success);
        assert_eq!(outcome.counts["repaired"], 0);
        assert_eq!(outcome.message, "All jobs have positions");
    }

    #[test]
    fn test_reset_and_flag_reseed() {
        let db = seeded();
        let ops = Operations::new(db.clone(), &Config::default());

        let outcome = ops.reset_and_flag_reseed();
        assert!(outcome.success, "{}", outcome.message);
        assert_eq!(outcome.counts["jobs"], 1);
        assert!(db
            .with_conn(|conn| flag_repo::is_set(conn, flag_repo::RESEED_REQUESTED))
            .unwrap());
        assert_eq!(ops.stats().counts["jobs"], 0);
    }

    #[test]
    fn test_reset_refused_in_production() {
        let db = seeded();
        let config = Config {
            environment: Environment::Production,
            ..Default::default()
        };
        let outcome = Operations::new(db.clone(), &config).reset_and_flag_reseed();
        assert!(!outcome.success);
        assert_eq!(stats_repo::snapshot(&db).unwrap().jobs, 1);
    }

    #[test]
    fn test_stats_counts() {
        let outcome = Operations::new(seeded(), &Config::default()).stats();
        assert!(outcome.success);
        assert_eq!(outcome.counts["associations"], 2);
        assert_eq!(outcome.counts["orphanJobs"], 0);
        assert_eq!(outcome.counts["position:Backend Engineer"], 1);
        assert_eq!(outcome.counts["position:Cloud Engineer"], 0);
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let json = serde_json::to_value(OperationOutcome::ok("done").with_count("repaired", 3usize)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["counts"]["repaired"], 3);
    }
}
