//! Core engines exposed to callers.
//!
//! One service per concern, mirroring the operation surface: task and
//! project CRUD with paginated/filtered/sorted listings, the association
//! manager (`add_or_move_task`), and the read-only due-today aggregations.
//! Services receive an explicit `Db` handle and configuration; they hold no
//! state of their own.

/// Due-today window joins across both collections.
pub mod aggregations;

/// Project query engine and the task↔project association manager.
pub mod projects;

/// Task query engine and lifecycle operations.
pub mod tasks;
