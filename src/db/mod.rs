//! Database layer for the taskboard crate.
//!
//! Persistence over two collections, `tasks` and `projects`, plus the
//! `project_tasks` link table carrying the task↔project association.
//! One store struct per collection, borrowing an explicitly constructed
//! `Db` handle; schema evolution goes through versioned migrations.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard::db::db::Db;
//! use taskboard::db::tasks::Tasks;
//! use taskboard::libs::task::Task;
//! use chrono::Local;
//!
//! # fn main() -> anyhow::Result<()> {
//! let db = Db::open_in_memory()?;
//! let tasks = Tasks::new(&db);
//! tasks.insert(&Task::new("Review code", Local::now().naive_local()))?;
//! # Ok(())
//! # }
//! ```

/// Core database connection handle with explicit open/teardown lifecycle.
pub mod db;

/// Versioned schema migration system, applied when a handle is opened.
pub mod migrations;

/// Projects collection store and the project→task link table.
pub mod projects;

/// Tasks collection store.
pub mod tasks;

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'`
/// pattern, so user search input matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
