//! Project domain types and listing criteria.
//!
//! A project owns the task↔project association: an ordered, duplicate-free
//! set of task ids. Read paths return `ProjectWithTasks`, where each
//! referenced id is resolved to the full task document in link order.

use crate::libs::entity_id::EntityId;
use crate::libs::paging::SortDir;
use crate::libs::status::Status;
use crate::libs::task::Task;
use chrono::{Local, NaiveDateTime};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub start_at: NaiveDateTime,
    pub due_at: NaiveDateTime,
    pub done_at: Option<NaiveDateTime>,
    pub status: Status,
}

impl Project {
    /// A freshly created project is pending, started now, with no tasks.
    pub fn new(name: &str, due_at: NaiveDateTime) -> Self {
        Project {
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
        Ok(Project {
            id: row.get(0)?,
            name: row.get(1)?,
            start_at: row.get(2)?,
            due_at: row.get(3)?,
            done_at: row.get(4)?,
            status: row.get(5)?,
        })
    }
}

/// A project with its referenced tasks resolved to full documents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithTasks {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// Fields a project update may touch. The id is never writable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub due_at: Option<NaiveDateTime>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.due_at.is_none()
    }
}

/// Allow-listed sort fields for project listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectSortBy {
    #[default]
    StartAt,
    DueAt,
}

impl ProjectSortBy {
    pub fn as_column(&self) -> &'static str {
        match self {
            ProjectSortBy::StartAt => "start_at",
            ProjectSortBy::DueAt => "due_at",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCriteria {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub sort_by: Option<ProjectSortBy>,
    pub sort: Option<SortDir>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Payload of the add-or-move operation: `from_project_id` is absent when
/// the task is not being detached from a source project first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrMoveTask {
    pub from_project_id: Option<EntityId>,
    pub to_project_id: EntityId,
    pub task_id: EntityId,
}
