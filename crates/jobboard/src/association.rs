//! Association manager: the job ↔ position link set.
//!
//! `link` replaces a job's whole link set inside one transaction, so a
//! failure at any point leaves the previous set in place and re-running it
//! never accumulates stale links.

use std::collections::BTreeSet;

use tracing::debug;

use crate::db::association_repo;
use crate::db::job_repo::JobPostingRow;
use crate::db::position_repo::PositionRow;
use crate::db::{Database, DatabaseError};
use crate::error::AssociationError;

#[derive(Clone)]
pub struct AssociationManager {
    db: Database,
}

impl AssociationManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Removes every link of `job_id`. Succeeds when there are none.
    pub fn clear(&self, job_id: i64) -> Result<usize, AssociationError> {
        self.db
            .with_conn(|conn| association_repo::delete_for_job(conn, job_id))
            .map_err(|source| AssociationError::Clear { job_id, source })
    }

    /// Makes the link set of `job_id` exactly `position_ids`.
    ///
    /// Clears and inserts in a single transaction. Duplicate ids in the
    /// input collapse to one link. Returns the number of links inserted.
    pub fn link<I>(&self, job_id: i64, position_ids: I) -> Result<usize, AssociationError>
    where
        I: IntoIterator<Item = i64>,
    {
        let ids: BTreeSet<i64> = position_ids.into_iter().collect();

        let inserted = self
            .db
            .with_transaction(|tx| {
                let removed = association_repo::delete_for_job(tx, job_id)?;
                for position_id in &ids {
                    association_repo::insert(tx, job_id, *position_id)?;
                }
                debug!(job_id, removed, inserted = ids.len(), "replaced job positions");
                Ok::<_, DatabaseError>(ids.len())
            })
            .map_err(|source| AssociationError::Link { job_id, source })?;

        Ok(inserted)
    }

    /// Positions currently linked to `job_id`, ordered by position id.
    pub fn associations_for(&self, job_id: i64) -> Result<Vec<PositionRow>, AssociationError> {
        self.db
            .with_conn(|conn| association_repo::positions_for_job(conn, job_id))
            .map_err(|source| AssociationError::Lookup { job_id, source })
    }

    /// Every job posting without a single link, via an anti-join.
    pub fn orphan_jobs(&self) -> Result<Vec<JobPostingRow>, AssociationError> {
        self.db
            .with_conn(association_repo::orphan_jobs)
            .map_err(AssociationError::Orphans)
    }

    /// Deletes every link of every job. Jobs and positions are untouched.
    pub fn clear_all(&self) -> Result<usize, AssociationError> {
        self.db
            .with_conn(association_repo::delete_all)
            .map_err(AssociationError::Reset)
    }
}
