//! Project query engine and the task↔project association manager.
//!
//! The association invariant (a task id appears in at most one project's
//! link set) is owned here: all membership mutations go through
//! `add_or_move_task`, and every existence check runs before the first
//! write.

use crate::db::db::Db;
use crate::db::projects::{ProjectFilter, Projects};
use crate::db::tasks::Tasks;
use crate::libs::config::Config;
use crate::libs::entity_id::EntityId;
use crate::libs::error::{Error, Result};
use crate::libs::paging::{self, Page, DEFAULT_PAGE};
use crate::libs::project::{AddOrMoveTask, Project, ProjectCriteria, ProjectPatch, ProjectWithTasks};
use crate::libs::status::Status;
use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

pub struct ProjectService<'a> {
    db: &'a Db,
    default_limit: u32,
}

impl<'a> ProjectService<'a> {
    pub fn new(db: &'a Db, config: &Config) -> Self {
        ProjectService {
            db,
            default_limit: config.default_limit,
        }
    }

    /// Paginated listing; every returned project embeds its resolved tasks.
    pub fn get_all(&self, criteria: &ProjectCriteria) -> Result<Page<ProjectWithTasks>> {
        let page = criteria.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = criteria.limit.filter(|l| *l > 0).unwrap_or(self.default_limit);
        let filter = ProjectFilter {
            search: criteria.search.as_deref(),
            status: criteria.status,
        };

        let store = Projects::new(self.db);
        let projects = store.fetch(
            &filter,
            criteria.sort_by.unwrap_or_default(),
            criteria.sort.unwrap_or_default(),
            limit,
            paging::skip(page, limit),
        )?;
        let total_count = store.count(&filter)?;

        let mut items = Vec::with_capacity(projects.len());
        for project in projects {
            let tasks = store.tasks_for(&project.id)?;
            items.push(ProjectWithTasks { project, tasks });
        }

        debug!(total_count, page, limit, "project listing executed");
        Ok(Page::new(items, total_count, page, limit))
    }

    /// Fetch one project with its task references resolved to documents.
    pub fn get_one(&self, id: &EntityId) -> Result<ProjectWithTasks> {
        let store = Projects::new(self.db);
        let project = store.get_by_id(id)?.ok_or(Error::ProjectNotFound)?;
        let tasks = store.tasks_for(id)?;
        Ok(ProjectWithTasks { project, tasks })
    }

    /// Create a project with server-assigned defaults and an empty task set.
    pub fn create_one(&self, name: &str, due_at: NaiveDateTime) -> Result<ProjectWithTasks> {
        let project = Project::new(name, due_at);
        let affected = Projects::new(self.db).insert(&project)?;
        if affected == 0 {
            return Err(Error::WriteUnacknowledged);
        }
        info!(id = %project.id, "project created");
        self.get_one(&project.id)
    }

    /// Partial update; the id is never writable.
    pub fn update_one(&self, id: &EntityId, patch: &ProjectPatch) -> Result<ProjectWithTasks> {
        let affected = Projects::new(self.db).update_fields(id, patch)?;
        if affected == 0 {
            return Err(Error::ProjectNotFound);
        }
        self.get_one(id)
    }

    /// Hard delete, returning the pre-delete document with embedded tasks.
    /// Referenced tasks stay in the task collection as orphans.
    pub fn delete_one(&self, id: &EntityId) -> Result<ProjectWithTasks> {
        let project = self.get_one(id)?;
        let affected = Projects::new(self.db).delete(id)?;
        if affected == 0 {
            return Err(Error::ProjectNotFound);
        }
        info!(id = %id, orphaned_tasks = project.tasks.len(), "project deleted");
        Ok(project)
    }

    /// Status transition: completing stamps `done_at`; re-entering the
    /// active state clears `done_at` and resets `start_at`.
    pub fn update_status(&self, id: &EntityId, status: Status) -> Result<ProjectWithTasks> {
        let current = self.get_one(id)?;
        let now = Local::now().naive_local();
        let (start_at, done_at) = match status {
            Status::Completed => (current.project.start_at, Some(now)),
            Status::Pending => (now, None),
        };
        let affected = Projects::new(self.db).set_status(id, status, start_at, done_at)?;
        if affected == 0 {
            return Err(Error::ProjectNotFound);
        }
        self.get_one(id)
    }

    /// Add a task to a project, optionally detaching it from a source
    /// project first.
    ///
    /// Check order matters: task, destination, source and source membership
    /// are all verified before the first write. The detach + attach pair runs
    /// in one transaction, and the attach uses set semantics (re-adding a
    /// present task is a no-op). Returns the refreshed destination.
    pub fn add_or_move_task(&self, payload: &AddOrMoveTask) -> Result<ProjectWithTasks> {
        let store = Projects::new(self.db);

        Tasks::new(self.db).get_by_id(&payload.task_id)?.ok_or(Error::TaskNotFound)?;
        store.get_by_id(&payload.to_project_id)?.ok_or(Error::ProjectNotFound)?;

        match &payload.from_project_id {
            Some(from_project_id) => {
                store.get_by_id(from_project_id)?.ok_or(Error::FromProjectNotFound)?;
                if !store.contains_task(from_project_id, &payload.task_id)? {
                    return Err(Error::FromProjectTaskNotFound);
                }
                store.move_task(from_project_id, &payload.to_project_id, &payload.task_id)?;
                info!(task = %payload.task_id, from = %from_project_id, to = %payload.to_project_id, "task moved");
            }
            None => {
                store.add_task(&payload.to_project_id, &payload.task_id)?;
                info!(task = %payload.task_id, to = %payload.to_project_id, "task added to project");
            }
        }

        self.get_one(&payload.to_project_id)
    }
}
