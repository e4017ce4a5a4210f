//! Server-generated entity identifiers.
//!
//! Every task and project is keyed by an opaque 24-character lowercase hex
//! string: a 4-byte unix timestamp followed by 8 random bytes. The timestamp
//! prefix keeps freshly generated ids roughly sortable by creation time.
//! Identifier shape is validated here, before any value reaches the store.

use crate::libs::error::{Error, Result};
use chrono::Utc;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const ID_LENGTH: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh id: 4 timestamp bytes + 8 random bytes, hex-encoded.
    pub fn generate() -> Self {
        let secs = Utc::now().timestamp() as u32;
        let random = Uuid::new_v4();
        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);
        EntityId(bytes.iter().map(|b| format!("{:02x}", b)).collect::<String>())
    }

    /// Validate an externally supplied id: exactly 24 hex characters.
    pub fn parse(value: &str) -> Result<Self> {
        if value.len() != ID_LENGTH {
            return Err(Error::Validation("Id length must be 24 characters".to_string()));
        }
        if !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Validation("Id must be a hex string".to_string()));
        }
        Ok(EntityId(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ToSql for EntityId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for EntityId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(|s| EntityId(s.to_string()))
    }
}
