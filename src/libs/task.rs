//! Task domain types and listing criteria.
//!
//! A task carries its own timestamps and status only; membership in a
//! project lives on the project side (see `libs::project`), never as a
//! field on the task itself.

use crate::libs::entity_id::EntityId;
use crate::libs::paging::SortDir;
use crate::libs::status::Status;
use chrono::{Local, NaiveDateTime};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub name: String,
    pub start_at: NaiveDateTime,
    pub due_at: NaiveDateTime,
    pub done_at: Option<NaiveDateTime>,
    pub status: Status,
}

impl Task {
    /// A freshly created task is pending, started now, not done.
    pub fn new(name: &str, due_at: NaiveDateTime) -> Self {
        Task {
            id: EntityId::generate(),
            name: name.to_string(),
            start_at: Local::now().naive_local(),
            due_at,
            done_at: None,
            status: Status::Pending,
        }
    }

    /// Map a `SELECT id, name, start_at, due_at, done_at, status` row.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Task {
            id: row.get(0)?,
            name: row.get(1)?,
            start_at: row.get(2)?,
            due_at: row.get(3)?,
            done_at: row.get(4)?,
            status: row.get(5)?,
        })
    }
}

/// Fields a task update may touch. The id is never writable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub name: Option<String>,
    pub due_at: Option<NaiveDateTime>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.due_at.is_none()
    }
}

/// Allow-listed sort fields for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskSortBy {
    #[default]
    StartAt,
    DueAt,
    DoneAt,
}

impl TaskSortBy {
    pub fn as_column(&self) -> &'static str {
        match self {
            TaskSortBy::StartAt => "start_at",
            TaskSortBy::DueAt => "due_at",
            TaskSortBy::DoneAt => "done_at",
        }
    }
}

/// Listing criteria as they arrive from the (upstream-validated) request.
/// Absent page/limit fall back to defaults at execution time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCriteria {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub sort_by: Option<TaskSortBy>,
    pub sort: Option<SortDir>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Restricts the listing to tasks referenced by this project.
    pub project_id: Option<EntityId>,
}
