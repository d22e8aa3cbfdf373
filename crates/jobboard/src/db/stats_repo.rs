//! Aggregate counts over the seeded tables.

use serde::Serialize;

use rusqlite::Connection;

use super::{association_repo, company_repo, job_repo, position_repo, Database, DatabaseError};

/// Job count for a single position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionStat {
    pub id: i64,
    pub name: String,
    pub job_count: u64,
}

/// Point-in-time summary of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub companies: u64,
    pub jobs: u64,
    pub positions: u64,
    pub associations: u64,
    pub orphan_jobs: u64,
    pub by_position: Vec<PositionStat>,
}

/// Per-position job counts, ordered by position name.
pub fn position_counts(conn: &Connection) -> Result<Vec<PositionStat>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.name, COUNT(jp.job_posting_id)
         FROM positions p
         LEFT JOIN job_positions jp ON jp.position_id = p.id
         GROUP BY p.id, p.name
         ORDER BY p.name",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(PositionStat {
                id: row.get(0)?,
                name: row.get(1)?,
                job_count: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Collects every count in one locked pass.
pub fn snapshot(db: &Database) -> Result<DatasetStats, DatabaseError> {
    db.with_conn(|conn| {
        Ok(DatasetStats {
            companies: company_repo::count(conn)?,
            jobs: job_repo::count(conn)?,
            positions: position_repo::count(conn)?,
            associations: association_repo::count(conn)?,
            orphan_jobs: association_repo::count_orphans(conn)?,
            by_position: position_counts(conn)?,
        })
    })
}
