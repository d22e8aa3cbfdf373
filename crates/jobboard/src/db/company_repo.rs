//! Company repository: find-or-create and bulk deletion for `companies`.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{now_rfc3339, DatabaseError};

/// A company row from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub industry: String,
    pub website: String,
    pub logo_url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CompanyRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            address: row.get("address")?,
            industry: row.get("industry")?,
            website: row.get("website")?,
            logo_url: row.get("logo_url")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Attributes for a company that may not exist yet.
#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    pub name: String,
    pub address: String,
    pub industry: String,
    pub website: String,
    pub logo_url: String,
}

/// Finds a company by exact (case-sensitive) name.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<CompanyRow>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT * FROM companies WHERE name = ?1",
            params![name],
            CompanyRow::from_row,
        )
        .optional()?;
    Ok(row)
}

/// Returns the company named `company.name`, inserting it first when absent.
///
/// The boolean is `true` when a new row was created. Attributes of an
/// existing company are left untouched.
pub fn find_or_create(
    conn: &Connection,
    company: &NewCompany,
) -> Result<(CompanyRow, bool), DatabaseError> {
    if let Some(existing) = find_by_name(conn, &company.name)? {
        return Ok((existing, false));
    }

    let now = now_rfc3339();
    conn.execute(
        "INSERT INTO companies (name, address, industry, website, logo_url, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            company.name,
            company.address,
            company.industry,
            company.website,
            company.logo_url,
            now
        ],
    )?;

    let created = find_by_name(conn, &company.name)?.ok_or_else(|| DatabaseError::Unconfirmed {
        table: "companies",
        key: company.name.clone(),
    })?;
    Ok((created, true))
}

/// Counts all companies.
pub fn count(conn: &Connection) -> Result<u64, DatabaseError> {
    let count: u64 = conn.query_row("SELECT COUNT(*) FROM companies", [], |r| r.get(0))?;
    Ok(count)
}

/// Deletes every company, returning the number of rows removed.
pub fn delete_all(conn: &Connection) -> Result<usize, DatabaseError> {
    Ok(conn.execute("DELETE FROM companies", [])?)
}
