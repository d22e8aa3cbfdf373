//! Job posting repository: inserts and lookups for `job_postings`.

use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{now_rfc3339, DatabaseError};

/// A job posting row from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPostingRow {
    pub id: i64,
    pub uuid: String,
    pub company_id: i64,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub salary_range: String,
    pub location: String,
    pub employment_type: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl JobPostingRow {
    pub(crate) fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            uuid: row.get("uuid")?,
            company_id: row.get("company_id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            requirements: row.get("requirements")?,
            salary_range: row.get("salary_range")?,
            location: row.get("location")?,
            employment_type: row.get("employment_type")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Attributes for a job posting about to be inserted.
///
/// `uuid` is generated when `None`.
#[derive(Debug, Clone, Default)]
pub struct NewJobPosting {
    pub uuid: Option<String>,
    pub company_id: i64,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub salary_range: String,
    pub location: String,
    pub employment_type: String,
    pub status: String,
}

/// Inserts a job posting and returns the stored row.
pub fn insert(conn: &Connection, job: &NewJobPosting) -> Result<JobPostingRow, DatabaseError> {
    let uuid = job
        .uuid
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let now = now_rfc3339();

    conn.execute(
        "INSERT INTO job_postings (uuid, company_id, title, description, requirements,
         salary_range, location, employment_type, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        params![
            uuid,
            job.company_id,
            job.title,
            job.description,
            job.requirements,
            job.salary_range,
            job.location,
            job.employment_type,
            job.status,
            now,
        ],
    )?;

    let id = conn.last_insert_rowid();
    find_by_id(conn, id)?.ok_or(DatabaseError::Unconfirmed {
        table: "job_postings",
        key: uuid,
    })
}

/// Finds a job posting by its internal id.
pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<JobPostingRow>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT * FROM job_postings WHERE id = ?1",
            params![id],
            JobPostingRow::from_row,
        )
        .optional()?;
    Ok(row)
}

/// Finds a job posting by its public uuid token.
pub fn find_by_uuid(conn: &Connection, uuid: &str) -> Result<Option<JobPostingRow>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT * FROM job_postings WHERE uuid = ?1",
            params![uuid],
            JobPostingRow::from_row,
        )
        .optional()?;
    Ok(row)
}

/// Lists every job posting of a company, oldest first.
pub fn list_by_company(
    conn: &Connection,
    company_id: i64,
) -> Result<Vec<JobPostingRow>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT * FROM job_postings WHERE company_id = ?1 ORDER BY id")?;
    let rows = stmt
        .query_map(params![company_id], JobPostingRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Counts all job postings.
pub fn count(conn: &Connection) -> Result<u64, DatabaseError> {
    let count: u64 = conn.query_row("SELECT COUNT(*) FROM job_postings", [], |r| r.get(0))?;
    Ok(count)
}

/// Deletes every job posting, returning the number of rows removed.
pub fn delete_all(conn: &Connection) -> Result<usize, DatabaseError> {
    Ok(conn.execute("DELETE FROM job_postings", [])?)
}
