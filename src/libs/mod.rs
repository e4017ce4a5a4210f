//! Core library modules for the taskboard crate.
//!
//! Serves as the entry point for shared domain types and infrastructure,
//! providing centralized access to the building blocks the store and
//! service layers are assembled from.
//!
//! ## Features
//!
//! - **Domain Types**: Tasks, projects and their listing criteria
//! - **Identifiers**: Server-generated 24-hex-char entity ids
//! - **Pagination**: Page envelope with total-count bookkeeping
//! - **Core Infrastructure**: Configuration, data storage, error taxonomy
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
//! let task = Task::new("Implement feature", Local::now().naive_local());
//! Tasks::new(&db).insert(&task)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data_storage;
pub mod entity_id;
pub mod error;
pub mod paging;
pub mod project;
pub mod status;
pub mod task;
