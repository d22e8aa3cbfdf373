//! Position registry: idempotent find-or-create over canonical positions.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::canonical::STANDARD_POSITIONS;
use crate::db::position_repo::{self, PositionRow};
use crate::db::Database;
use crate::error::RegistryError;

/// Store of canonical positions keyed by unique name.
#[derive(Clone)]
pub struct PositionRegistry {
    db: Database,
}

impl PositionRegistry {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Finds or creates the position with exactly this name.
    ///
    /// Repeated calls with the same name return the same identity.
    pub fn resolve(&self, name: &str) -> Result<PositionRow, RegistryError> {
        self.resolve_tracked(name).map(|(row, _)| row)
    }

    /// Like [`resolve`](Self::resolve), also reporting whether the position
    /// was created by this call.
    pub fn resolve_tracked(&self, name: &str) -> Result<(PositionRow, bool), RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let (row, created) = self
            .db
            .with_conn(|conn| position_repo::find_or_create(conn, name))
            .map_err(|source| RegistryError::Position {
                name: name.to_string(),
                source,
            })?;

        if created {
            debug!(position_id = row.id, name = %row.name, "created position");
        }
        Ok((row, created))
    }

    /// All persisted positions, in stable id order.
    pub fn list(&self) -> Result<Vec<PositionRow>, RegistryError> {
        self.db
            .with_conn(position_repo::list)
            .map_err(RegistryError::List)
    }

    /// Resolves every name in [`STANDARD_POSITIONS`].
    ///
    /// A name that fails to resolve is logged and left out of the result;
    /// the remaining names are still resolved.
    pub fn seed_standard(&self) -> Vec<PositionRow> {
        let mut seeded = Vec::with_capacity(STANDARD_POSITIONS.len());
        for name in STANDARD_POSITIONS {
            match self.resolve(name) {
                Ok(row) => seeded.push(row),
                Err(e) => warn!(error = %e, "standard position not seeded"),
            }
        }
        info!(
            seeded = seeded.len(),
            expected = STANDARD_POSITIONS.len(),
            "standard positions resolved"
        );
        seeded
    }
}

/// In-memory name → position map keyed by lowercase canonical name.
#[derive(Debug, Default, Clone)]
pub struct PositionIndex {
    by_name: HashMap<String, PositionRow>,
}

impl PositionIndex {
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = PositionRow>,
    {
        let mut index = Self::default();
        for position in positions {
            index.insert(position);
        }
        index
    }

    pub fn get(&self, canonical_name: &str) -> Option<&PositionRow> {
        self.by_name.get(&canonical_name.to_lowercase())
    }

    pub fn insert(&mut self, position: PositionRow) {
        self.by_name.insert(position.name.to_lowercase(), position);
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
