//! One persisted, id-keyed collection
//!
//! The in-memory copy only changes after the new state has been written, so
//! a failed write leaves the previous snapshot in place.

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::{
    db::Db,
    errors::{Result, VaultError},
    ids::IdGenerator,
    merge::Keyed,
};

/// Attempts before giving up on a colliding id generator
pub const MAX_ID_ATTEMPTS: usize = 32;

pub(crate) struct Collection<T> {
    key:     &'static str,
    records: Vec<T>,
}

impl<T> Collection<T>
where
    T: Keyed + Clone + Serialize + DeserializeOwned,
{
    /// Load from `db`, falling back to `seed` when absent or unreadable
    pub(crate) fn load(db: &Db, key: &'static str, seed: fn() -> Vec<T>) -> Result<Self> {
        let records = match db.load(key)? {
            Some(data) => serde_json::from_str(&data).unwrap_or_else(|err| {
                warn!(key, %err, "stored collection unreadable, restoring defaults");
                seed()
            }),
            None => seed(),
        };
        Ok(Self { key, records })
    }

    pub(crate) fn records(&self) -> &[T] {
        &self.records
    }

    pub(crate) fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.key() == id)
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Persist `records` and make them the current state
    pub(crate) fn commit(&mut self, db: &Db, records: Vec<T>) -> Result<()> {
        let (key, data) = self.encode(&records)?;
        db.save(key, &data)?;
        self.swap(records);
        Ok(())
    }

    /// Storage key and document for `records`, for multi-collection writes
    pub(crate) fn encode(&self, records: &[T]) -> Result<(&'static str, String)> {
        Ok((self.key, serde_json::to_string(records)?))
    }

    /// Make `records` current; only after they have been persisted
    pub(crate) fn swap(&mut self, records: Vec<T>) {
        self.records = records;
    }

    /// A generated id not used by any record of this collection
    pub(crate) fn fresh_id(&self, ids: &mut impl IdGenerator) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = ids.generate();
            if !candidate.is_empty() && !self.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(VaultError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}
