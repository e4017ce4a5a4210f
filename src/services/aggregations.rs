//! Due-today reports: cross-collection joins windowed to the current
//! calendar day in server-local time.
//!
//! The two reports are intentionally asymmetric. `tasks_due_today` filters
//! the *projects* by due date and flattens their tasks; `projects_due_today`
//! keeps every project and filters its *linked tasks* by due date. They are
//! genuinely different aggregations, not two views of one.

use crate::db::db::Db;
use crate::db::projects::Projects;
use crate::libs::error::Result;
use crate::libs::project::Project;
use crate::libs::task::Task;
use chrono::{Duration, Local, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

/// One row of the tasks-due-today report: a task together with the
/// qualifying project referencing it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDueRow {
    #[serde(flatten)]
    pub task: Task,
    pub project: Project,
}

/// One row of the projects-due-today report: a project together with one
/// of its linked tasks due inside the window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDueRow {
    #[serde(flatten)]
    pub project: Project,
    pub task: Task,
}

pub struct AggregationService<'a> {
    db: &'a Db,
}

impl<'a> AggregationService<'a> {
    pub fn new(db: &'a Db) -> Self {
        AggregationService { db }
    }

    /// Every task referenced by a project whose `due_at` falls inside
    /// today's window, one row per (task, qualifying project) pair. The
    /// task's own due date plays no part here.
    pub fn tasks_due_today(&self) -> Result<Vec<TaskDueRow>> {
        let (start, end) = today_window();
        let rows = Projects::new(self.db).tasks_due_in(start, end)?;
        debug!(rows = rows.len(), "tasks-due-today report computed");
        Ok(rows.into_iter().map(|(task, project)| TaskDueRow { task, project }).collect())
    }

    /// Every (project, linked task) pair where the *task's* `due_at` falls
    /// inside today's window. Projects themselves are not date-filtered.
    pub fn projects_due_today(&self) -> Result<Vec<ProjectDueRow>> {
        let (start, end) = today_window();
        let rows = Projects::new(self.db).projects_due_in(start, end)?;
        debug!(rows = rows.len(), "projects-due-today report computed");
        Ok(rows.into_iter().map(|(project, task)| ProjectDueRow { project, task }).collect())
    }
}

/// Half-open window for the current local calendar day: today's midnight
/// up to but excluding tomorrow's. Covers fractional-second timestamps.
fn today_window() -> (NaiveDateTime, NaiveDateTime) {
    let start = Local::now().date_naive().and_hms_opt(0, 0, 0).unwrap_or_default();
    (start, start + Duration::days(1))
}
