//! Persisted operational flags (`app_flags`).

use rusqlite::{params, Connection, OptionalExtension};

use super::{now_rfc3339, DatabaseError};

/// Set by a destructive reset; consumed by the next startup.
pub const RESEED_REQUESTED: &str = "reseed_requested";

/// Sets (or overwrites) a flag.
pub fn set(conn: &Connection, key: &str, value: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO app_flags (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, now_rfc3339()],
    )?;
    Ok(())
}

/// Reads a flag value.
pub fn get(conn: &Connection, key: &str) -> Result<Option<String>, DatabaseError> {
    let value = conn
        .query_row(
            "SELECT value FROM app_flags WHERE key = ?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(value)
}

/// True when the flag exists with value `"true"`.
pub fn is_set(conn: &Connection, key: &str) -> Result<bool, DatabaseError> {
    Ok(get(conn, key)?.as_deref() == Some("true"))
}

/// Removes a flag. Removing a missing flag is not an error.
pub fn clear(conn: &Connection, key: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM app_flags WHERE key = ?1", params![key])?;
    Ok(())
}
