//! Destructive reset: empties every seeded table in one transaction.
//!
//! Deletion runs links → job postings → companies → positions so no step
//! ever leaves a dangling foreign key. Callers are responsible for keeping
//! this away from production data.

use serde::Serialize;
use tracing::{info, info_span};

use rusqlite::Transaction;

use crate::db::{
    association_repo, company_repo, flag_repo, job_repo, position_repo, Database, DatabaseError,
};
use crate::error::TransactionError;

/// Rows deleted per table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetReport {
    pub associations: usize,
    pub jobs: usize,
    pub companies: usize,
    pub positions: usize,
}

fn step(name: &'static str) -> impl Fn(DatabaseError) -> TransactionError {
    move |source| TransactionError::Step { step: name, source }
}

fn clear_tables(tx: &Transaction<'_>) -> Result<ResetReport, TransactionError> {
    Ok(ResetReport {
        associations: association_repo::delete_all(tx).map_err(step("job_positions"))?,
        jobs: job_repo::delete_all(tx).map_err(step("job_postings"))?,
        companies: company_repo::delete_all(tx).map_err(step("companies"))?,
        positions: position_repo::delete_all(tx).map_err(step("positions"))?,
    })
}

fn log_cleared(report: &ResetReport) {
    info!(
        associations = report.associations,
        jobs = report.jobs,
        companies = report.companies,
        positions = report.positions,
        "dataset cleared"
    );
}

/// Deletes all associations, job postings, companies and positions.
///
/// Either every table is emptied or, on any failure, nothing is removed.
pub fn reset_all(db: &Database) -> Result<ResetReport, TransactionError> {
    let _span = info_span!("reset_all").entered();

    let report = db.with_transaction(clear_tables)?;
    log_cleared(&report);
    Ok(report)
}

/// Same as [`reset_all`], and records a re-seed request for the next
/// startup in the same transaction. The tables are never left empty
/// without the request saved.
pub fn reset_all_and_request_reseed(db: &Database) -> Result<ResetReport, TransactionError> {
    let _span = info_span!("reset_all", reseed = true).entered();

    let report = db.with_transaction(|tx| {
        let report = clear_tables(tx)?;
        flag_repo::set(tx, flag_repo::RESEED_REQUESTED, "true").map_err(step("app_flags"))?;
        Ok::<_, TransactionError>(report)
    })?;
    log_cleared(&report);
    info!("re-seed requested for next startup");
    Ok(report)
}
