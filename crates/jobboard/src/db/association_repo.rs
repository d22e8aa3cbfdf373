//! Association repository: the `job_positions` link table.
//!
//! Plain row-level primitives. The clear-then-insert protocol and its
//! transaction boundary live in [`crate::association`].

use rusqlite::{params, Connection};

use super::job_repo::JobPostingRow;
use super::position_repo::PositionRow;
use super::DatabaseError;

/// Removes every link of a job, returning the number of rows removed.
pub fn delete_for_job(conn: &Connection, job_id: i64) -> Result<usize, DatabaseError> {
    Ok(conn.execute(
        "DELETE FROM job_positions WHERE job_posting_id = ?1",
        params![job_id],
    )?)
}

/// Inserts a single (job, position) link.
pub fn insert(conn: &Connection, job_id: i64, position_id: i64) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO job_positions (job_posting_id, position_id) VALUES (?1, ?2)",
        params![job_id, position_id],
    )?;
    Ok(())
}

/// Positions linked to a job, ordered by position id.
pub fn positions_for_job(conn: &Connection, job_id: i64) -> Result<Vec<PositionRow>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.name, p.created_at
         FROM positions p
         JOIN job_positions jp ON jp.position_id = p.id
         WHERE jp.job_posting_id = ?1
         ORDER BY p.id",
    )?;
    let rows = stmt
        .query_map(params![job_id], PositionRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Job postings with no row in `job_positions`.
pub fn orphan_jobs(conn: &Connection) -> Result<Vec<JobPostingRow>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT j.*
         FROM job_postings j
         LEFT JOIN job_positions jp ON jp.job_posting_id = j.id
         WHERE jp.job_posting_id IS NULL
         ORDER BY j.id",
    )?;
    let rows = stmt
        .query_map([], JobPostingRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Counts job postings with no row in `job_positions`.
pub fn count_orphans(conn: &Connection) -> Result<u64, DatabaseError> {
    let count: u64 = conn.query_row(
        "SELECT COUNT(*)
         FROM job_postings j
         LEFT JOIN job_positions jp ON jp.job_posting_id = j.id
         WHERE jp.job_posting_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    Ok(count)
}

/// Counts all links.
pub fn count(conn: &Connection) -> Result<u64, DatabaseError> {
    let count: u64 = conn.query_row("SELECT COUNT(*) FROM job_positions", [], |r| r.get(0))?;
    Ok(count)
}

/// Deletes every link, returning the number of rows removed.
pub fn delete_all(conn: &Connection) -> Result<usize, DatabaseError> {
    Ok(conn.execute("DELETE FROM job_positions", [])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::company_repo::{self, NewCompany};
    use crate::db::job_repo::{self, NewJobPosting};
    use crate::db::position_repo;
    use crate::db::Database;

    fn new_job(conn: &Connection, title: &str) -> Result<JobPostingRow, DatabaseError> {
        let (company, _) = company_repo::find_or_create(
            conn,
            &NewCompany {
                name: "Acme".to_string(),
                ..Default::default()
            },
        )?;
        job_repo::insert(
            conn,
            &NewJobPosting {
                company_id: company.id,
                title: title.to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_insert_and_lookup() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            let job = new_job(conn, "Role")?;
            let (backend, _) = position_repo::find_or_create(conn, "Backend Engineer")?;
            let (frontend, _) = position_repo::find_or_create(conn, "Frontend Engineer")?;
            insert(conn, job.id, frontend.id)?;
            insert(conn, job.id, backend.id)?;

            let linked = positions_for_job(conn, job.id)?;
            assert_eq!(linked, vec![backend, frontend]);
            assert_eq!(count(conn)?, 2);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_orphan_jobs_anti_join() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            let linked = new_job(conn, "Linked")?;
            let orphan = new_job(conn, "Orphan")?;
            let (pos, _) = position_repo::find_or_create(conn, "QA Engineer")?;
            insert(conn, linked.id, pos.id)?;

            let orphans = orphan_jobs(conn)?;
            assert_eq!(orphans.len(), 1);
            assert_eq!(orphans[0].id, orphan.id);
            assert_eq!(count_orphans(conn)?, 1);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_delete_for_job_only_touches_that_job() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            let a = new_job(conn, "A")?;
            let b = new_job(conn, "B")?;
            let (pos, _) = position_repo::find_or_create(conn, "Data Engineer")?;
            insert(conn, a.id, pos.id)?;
            insert(conn, b.id, pos.id)?;

            assert_eq!(delete_for_job(conn, a.id)?, 1);
            assert_eq!(delete_for_job(conn, a.id)?, 0);
            assert!(positions_for_job(conn, a.id)?.is_empty());
            assert_eq!(positions_for_job(conn, b.id)?.len(), 1);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_delete_all() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            let job = new_job(conn, "Role")?;
            let (pos, _) = position_repo::find_or_create(conn, "Cloud Engineer")?;
            insert(conn, job.id, pos.id)?;
            assert_eq!(delete_all(conn)?, 1);
            assert_eq!(count(conn)?, 0);
            Ok(())
        })
        .unwrap();
    }
}
