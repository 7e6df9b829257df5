//! Fail-soft key-value storage.
//!
//! Values are kept as serialized JSON text under string keys. The [`Store`]
//! facade never reports an error to its caller: unreadable entries come back
//! as `None` and rejected writes are logged while the previous content stays
//! in place. Errors exist only at the [`Medium`] seam.

use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Fixed entry names, one per collection plus the session user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    CurrentUser,
    Users,
    Teachers,
    Students,
    Classes,
    Attendance,
    Grades,
}

impl StorageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::CurrentUser => "attendance_current_user",
            StorageKey::Users => "attendance_users",
            StorageKey::Teachers => "attendance_teachers",
            StorageKey::Students => "attendance_students",
            StorageKey::Classes => "attendance_classes",
            StorageKey::Attendance => "attendance_records",
            StorageKey::Grades => "attendance_grades",
        }
    }
}

pub trait Medium {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

fn check_quota(quota: Option<usize>, others: usize, key: &str, value: &str) -> Result<(), StoreError> {
    let Some(quota) = quota else { return Ok(()) };
    let needed = others + key.len() + value.len();
    if needed > quota {
        return Err(StoreError::QuotaExceeded { needed, quota });
    }
    Ok(())
}

/// Workspace-backed medium over the `kv_entries` table.
pub struct SqliteMedium {
    conn: Connection,
    quota: Option<usize>,
}

impl SqliteMedium {
    /// Expects `kv_entries` to exist already (see `db::open_db`).
    pub fn new(conn: Connection, quota: Option<usize>) -> Self {
        Self { conn, quota }
    }

    fn bytes_excluding(&self, key: &str) -> Result<usize, StoreError> {
        let n: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
             FROM kv_entries
             WHERE key <> ?",
            [key],
            |r| r.get(0),
        )?;
        Ok(usize::try_from(n).unwrap_or(0))
    }
}

impl Medium for SqliteMedium {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v = self
            .conn
            .query_row("SELECT value FROM kv_entries WHERE key = ?", [key], |r| {
                r.get::<_, String>(0)
            })
            .optional()?;
        Ok(v)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.quota.is_some() {
            let others = self.bytes_excluding(key)?;
            check_quota(self.quota, others, key, value)?;
        }
        let now = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO kv_entries(key, value, updated_at) VALUES(?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, &now),
        )?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?", [key])?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM kv_entries", [])?;
        Ok(())
    }
}

/// Process-local medium; nothing survives a restart.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Default)]
pub struct MemoryMedium {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

#[cfg_attr(not(test), allow(dead_code))]
impl MemoryMedium {
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(quota),
        }
    }
}

impl Medium for MemoryMedium {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let others: usize = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        check_quota(self.quota, others, key, value)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}

pub struct Store {
    medium: Box<dyn Medium>,
}

impl Store {
    pub fn new(medium: impl Medium + 'static) -> Self {
        Self {
            medium: Box::new(medium),
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn in_memory() -> Self {
        Self::new(MemoryMedium::default())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.medium.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "store read failed");
                return None;
            }
        };
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable store entry");
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let res = serde_json::to_string(value)
            .map_err(StoreError::from)
            .and_then(|raw| self.medium.write(key, &raw));
        if let Err(e) = res {
            tracing::warn!(key, error = %e, "failed to save store entry");
        }
    }

    pub fn remove(&mut self, key: &str) {
        if let Err(e) = self.medium.delete(key) {
            tracing::warn!(key, error = %e, "failed to remove store entry");
        }
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.medium.clear() {
            tracing::warn!(error = %e, "failed to clear store");
        }
    }

    /// Writes a raw, unvalidated string to simulate foreign writers.
    #[cfg(test)]
    pub fn set_raw(&mut self, key: &str, raw: &str) {
        if let Err(e) = self.medium.write(key, raw) {
            tracing::warn!(key, error = %e, "failed to save raw store entry");
        }
    }
}
