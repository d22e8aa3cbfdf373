//! Position repository: canonical position records keyed by unique name.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

use super::{now_rfc3339, DatabaseError};

/// A canonical position row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRow {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

impl PositionRow {
    pub(crate) fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Finds a position by exact name.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<PositionRow>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, created_at FROM positions WHERE name = ?1",
            params![name],
            PositionRow::from_row,
        )
        .optional()?;
    Ok(row)
}

/// Finds a position by id.
pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<PositionRow>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, created_at FROM positions WHERE id = ?1",
            params![id],
            PositionRow::from_row,
        )
        .optional()?;
    Ok(row)
}

/// Returns the position named `name`, inserting it first when absent.
///
/// The insert relies on the UNIQUE constraint, so a concurrent insert of the
/// same name degrades to a lookup. The row is always read back before it is
/// returned; the boolean is `true` when this call created it.
pub fn find_or_create(conn: &Connection, name: &str) -> Result<(PositionRow, bool), DatabaseError> {
    let inserted = conn.execute(
        "INSERT INTO positions (name, created_at) VALUES (?1, ?2)
         ON CONFLICT(name) DO NOTHING",
        params![name, now_rfc3339()],
    )?;

    let row = find_by_name(conn, name)?.ok_or_else(|| DatabaseError::Unconfirmed {
        table: "positions",
        key: name.to_string(),
    })?;
    Ok((row, inserted > 0))
}

/// Lists all positions in id order.
pub fn list(conn: &Connection) -> Result<Vec<PositionRow>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM positions ORDER BY id")?;
    let rows = stmt
        .query_map([], PositionRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Counts all positions.
pub fn count(conn: &Connection) -> Result<u64, DatabaseError> {
    let count: u64 = conn.query_row("SELECT COUNT(*) FROM positions", [], |r| r.get(0))?;
    Ok(count)
}

/// Deletes every position, returning the number of rows removed.
pub fn delete_all(conn: &Connection) -> Result<usize, DatabaseError> {
    Ok(conn.execute("DELETE FROM positions", [])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_find_or_create_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            let (a, created_a) = find_or_create(conn, "Backend Engineer")?;
            let (b, created_b) = find_or_create(conn, "Backend Engineer")?;
            assert!(created_a);
            assert!(!created_b);
            assert_eq!(a.id, b.id);
            assert_eq!(count(conn)?, 1);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_names_are_case_sensitive_in_storage() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            find_or_create(conn, "Backend Engineer")?;
            find_or_create(conn, "backend engineer")?;
            assert_eq!(count(conn)?, 2);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_list_in_insertion_order() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            find_or_create(conn, "Data Engineer")?;
            find_or_create(conn, "Cloud Engineer")?;
            let names: Vec<String> = list(conn)?.into_iter().map(|p| p.name).collect();
            assert_eq!(names, vec!["Data Engineer", "Cloud Engineer"]);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_find_by_id() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            let (created, _) = find_or_create(conn, "QA Engineer")?;
            assert_eq!(find_by_id(conn, created.id)?, Some(created));
            assert!(find_by_id(conn, 9999)?.is_none());
            Ok(())
        })
        .unwrap();
    }
}
