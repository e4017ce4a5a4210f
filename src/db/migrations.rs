//! Database schema migration management.
//!
//! Versioned, forward-only migrations applied automatically when a `Db`
//! handle is opened. Applied versions are recorded in a tracking table so
//! every environment converges on the same schema.

use anyhow::Result;
use rusqlite::{params, Connection, Transaction};
use tracing::{debug, info};

/// Tracking table recording every applied migration.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: entity collections and the association table.
        //
        // Note the deliberate absence of foreign keys on project_tasks: the
        // store does not enforce referential integrity, the association
        // manager verifies both sides before mutating either.
        self.add_migration(1, "create_tasks_projects_links", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id TEXT NOT NULL PRIMARY KEY,
                    name TEXT NOT NULL,
                    start_at TIMESTAMP NOT NULL,
                    due_at TIMESTAMP NOT NULL,
                    done_at TIMESTAMP,
                    status TEXT NOT NULL DEFAULT 'pending'
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS projects (
                    id TEXT NOT NULL PRIMARY KEY,
                    name TEXT NOT NULL,
                    start_at TIMESTAMP NOT NULL,
                    due_at TIMESTAMP NOT NULL,
                    done_at TIMESTAMP,
                    status TEXT NOT NULL DEFAULT 'pending'
                )",
                [],
            )?;

            // Project-side task membership; rowid keeps link insertion order.
            tx.execute(
                "CREATE TABLE IF NOT EXISTS project_tasks (
                    project_id TEXT NOT NULL,
                    task_id TEXT NOT NULL,
                    PRIMARY KEY (project_id, task_id)
                )",
                [],
            )?;

            // Indices for the date-window aggregations and sorted listings
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_due_at ON tasks(due_at)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_projects_due_at ON projects(due_at)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_project_tasks_task ON project_tasks(task_id)", [])?;

            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Apply all pending migrations, each recorded in the tracking table.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            debug!("database schema is up to date");
            return Ok(());
        }

        let tx = conn.transaction()?;
        for migration in pending {
            info!(version = migration.version, name = migration.name, "applying migration");
            (migration.up)(&tx)?;
            tx.execute("INSERT INTO migrations (version, name) VALUES (?1, ?2)", params![migration.version, migration.name])?;
        }
        tx.commit()?;

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));
        Ok(version.unwrap_or(0))
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize a connection: runs all pending migrations.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

/// Current schema version (0 when no migrations have been applied).
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));
    Ok(version.unwrap_or(0))
}
