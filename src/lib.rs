//! # Taskboard - task and project management backend core
//!
//! Persistence, association and query engine for tasks grouped into
//! projects: CRUD stores over SQLite, the task↔project association
//! manager, paginated/filtered listings and due-today reports.
//!
//! ## Features
//!
//! - **Task Management**: Create, update, complete and delete tasks
//! - **Projects**: Ordered, duplicate-free task membership with atomic
//!   add/move semantics
//! - **Query Engine**: Case-insensitive search, status filters, allow-listed
//!   sorting and page/limit pagination with total counts
//! - **Aggregations**: "Due today" cross-collection reports
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard::db::db::Db;
//! use taskboard::libs::config::Config;
//! use taskboard::services::tasks::TaskService;
//! use chrono::Local;
//!
//! fn main() -> anyhow::Result<()> {
//!     let db = Db::open_in_memory()?;
//!     let config = Config::read()?;
//!     let tasks = TaskService::new(&db, &config);
//!     let task = tasks.create_one("Review code", Local::now().naive_local())?;
//!     println!("created {}", task.id);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod libs;
pub mod services;
