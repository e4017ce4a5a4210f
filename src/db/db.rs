//! Database handle with explicit lifecycle.
//!
//! The handle is constructed once by the host (no hidden module-global
//! connection), migrations run at open, and stores borrow the connection
//! for the handle's lifetime.

use crate::db::migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "taskboard.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Open the database at the platform data directory default location.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    /// Open (and migrate) a database at an explicit path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        migrations::init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        migrations::init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }
}
