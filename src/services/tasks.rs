//! Task query engine and lifecycle operations.

use crate::db::db::Db;
use crate::db::projects::Projects;
use crate::db::tasks::{TaskFilter, Tasks};
use crate::libs::config::Config;
use crate::libs::entity_id::EntityId;
use crate::libs::error::{Error, Result};
use crate::libs::paging::{self, Page, DEFAULT_PAGE};
use crate::libs::status::Status;
use crate::libs::task::{Task, TaskCriteria, TaskPatch};
use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

pub struct TaskService<'a> {
    db: &'a Db,
    default_limit: u32,
}

impl<'a> TaskService<'a> {
    pub fn new(db: &'a Db, config: &Config) -> Self {
        TaskService {
            db,
            default_limit: config.default_limit,
        }
    }

    /// Paginated listing. When `project_id` is present the scan is
    /// restricted to tasks referenced by that project (and the total count
    /// runs over the same restricted set).
    pub fn get_all(&self, criteria: &TaskCriteria) -> Result<Page<Task>> {
        if let Some(project_id) = &criteria.project_id {
            // The link table alone cannot tell "no project" from "empty
            // project"; resolve the distinction before scanning.
            Projects::new(self.db).get_by_id(project_id)?.ok_or(Error::ProjectNotFound)?;
        }

        let page = criteria.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = criteria.limit.filter(|l| *l > 0).unwrap_or(self.default_limit);
        let filter = TaskFilter {
            search: criteria.search.as_deref(),
            status: criteria.status,
            project_id: criteria.project_id.as_ref(),
        };

        let store = Tasks::new(self.db);
        let items = store.fetch(
            &filter,
            criteria.sort_by.unwrap_or_default(),
            criteria.sort.unwrap_or_default(),
            limit,
            paging::skip(page, limit),
        )?;
        let total_count = store.count(&filter)?;

        debug!(total_count, page, limit, "task listing executed");
        Ok(Page::new(items, total_count, page, limit))
    }

    pub fn get_one(&self, id: &EntityId) -> Result<Task> {
        Tasks::new(self.db).get_by_id(id)?.ok_or(Error::TaskNotFound)
    }

    /// Create a task with server-assigned defaults and return the stored
    /// document.
    pub fn create_one(&self, name: &str, due_at: NaiveDateTime) -> Result<Task> {
        let task = Task::new(name, due_at);
        let affected = Tasks::new(self.db).insert(&task)?;
        if affected == 0 {
            return Err(Error::WriteUnacknowledged);
        }
        info!(id = %task.id, "task created");
        self.get_one(&task.id)
    }

    /// Partial update; the id is never writable. Returns the refreshed
    /// document.
    pub fn update_one(&self, id: &EntityId, patch: &TaskPatch) -> Result<Task> {
        let affected = Tasks::new(self.db).update_fields(id, patch)?;
        if affected == 0 {
            return Err(Error::TaskNotFound);
        }
        self.get_one(id)
    }

    /// Hard delete, returning the removed document.
    pub fn delete_one(&self, id: &EntityId) -> Result<Task> {
        let task = self.get_one(id)?;
        let affected = Tasks::new(self.db).delete(id)?;
        if affected == 0 {
            return Err(Error::TaskNotFound);
        }
        info!(id = %id, "task deleted");
        Ok(task)
    }

    /// Status transition: completing stamps `done_at`; re-entering the
    /// active state clears `done_at` and resets `start_at`.
    pub fn update_status(&self, id: &EntityId, status: Status) -> Result<Task> {
        let current = self.get_one(id)?;
        let now = Local::now().naive_local();
        let (start_at, done_at) = match status {
            Status::Completed => (current.start_at, Some(now)),
            Status::Pending => (now, None),
        };
        let affected = Tasks::new(self.db).set_status(id, status, start_at, done_at)?;
        if affected == 0 {
            return Err(Error::TaskNotFound);
        }
        self.get_one(id)
    }
}
