//! Projects collection store and the project→task link table.
//!
//! The `project_tasks` table is the sole carrier of the task↔project
//! association: one row per (project, task) pair, primary-keyed to give the
//! link set its no-duplicates semantics, ordered by rowid (link insertion
//! order). The two due-today join queries also live here since both walk
//! the link table.

use crate::db::db::Db;
use crate::db::escape_like;
use crate::libs::entity_id::EntityId;
use crate::libs::error::Result;
use crate::libs::paging::SortDir;
use crate::libs::project::{Project, ProjectPatch, ProjectSortBy};
use crate::libs::status::Status;
use crate::libs::task::Task;
use chrono::NaiveDateTime;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const PROJECT_COLUMNS: &str = "id, name, start_at, due_at, done_at, status";
const SELECT_PROJECT_BY_ID: &str = "SELECT id, name, start_at, due_at, done_at, status FROM projects WHERE id = ?1";
const INSERT_PROJECT: &str = "INSERT INTO projects (id, name, start_at, due_at, done_at, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_STATUS: &str = "UPDATE projects SET status = ?2, start_at = ?3, done_at = ?4 WHERE id = ?1";
const DELETE_PROJECT: &str = "DELETE FROM projects WHERE id = ?1";

const SELECT_PROJECT_TASKS: &str = "
    SELECT t.id, t.name, t.start_at, t.due_at, t.done_at, t.status
    FROM tasks t
    JOIN project_tasks pt ON pt.task_id = t.id
    WHERE pt.project_id = ?1
    ORDER BY pt.rowid
";
const SELECT_LINK: &str = "SELECT 1 FROM project_tasks WHERE project_id = ?1 AND task_id = ?2";
const INSERT_LINK: &str = "INSERT OR IGNORE INTO project_tasks (project_id, task_id) VALUES (?1, ?2)";
const DELETE_LINK: &str = "DELETE FROM project_tasks WHERE project_id = ?1 AND task_id = ?2";
const DELETE_ALL_LINKS: &str = "DELETE FROM project_tasks WHERE project_id = ?1";

// Tasks-due-today report: every task linked from a project whose own
// due_at falls inside the window, one row per (task, qualifying project).
const SELECT_TASKS_DUE: &str = "
    SELECT t.id, t.name, t.start_at, t.due_at, t.done_at, t.status,
           p.id, p.name, p.start_at, p.due_at, p.done_at, p.status
    FROM tasks t
    JOIN project_tasks pt ON pt.task_id = t.id
    JOIN projects p ON p.id = pt.project_id
    WHERE p.due_at >= ?1 AND p.due_at < ?2
    ORDER BY pt.rowid
";

// Projects-due-today report: projects are not date-filtered, their linked
// tasks are; one row per (project, matching task).
const SELECT_PROJECTS_DUE: &str = "
    SELECT p.id, p.name, p.start_at, p.due_at, p.done_at, p.status,
           t.id, t.name, t.start_at, t.due_at, t.done_at, t.status
    FROM projects p
    JOIN project_tasks pt ON pt.project_id = p.id
    JOIN tasks t ON t.id = pt.task_id
    WHERE t.due_at >= ?1 AND t.due_at < ?2
    ORDER BY pt.rowid
";

/// Criteria applied to both the paginated scan and the total count.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter<'a> {
    pub search: Option<&'a str>,
    pub status: Option<Status>,
}

pub struct Projects<'a> {
    conn: &'a Connection,
}

impl<'a> Projects<'a> {
    pub fn new(db: &'a Db) -> Self {
        Projects { conn: &db.conn }
    }

    pub fn get_by_id(&self, id: &EntityId) -> Result<Option<Project>> {
        let project = self.conn.query_row(SELECT_PROJECT_BY_ID, params![id], Project::from_row).optional()?;
        Ok(project)
    }

    pub fn insert(&self, project: &Project) -> Result<usize> {
        let affected = self.conn.execute(
            INSERT_PROJECT,
            params![project.id, project.name, project.start_at, project.due_at, project.done_at, project.status],
        )?;
        Ok(affected)
    }

    /// Partial field update. The id itself is never part of the SET list.
    pub fn update_fields(&self, id: &EntityId, patch: &ProjectPatch) -> Result<usize> {
        if patch.is_empty() {
            // Nothing to write; report whether the row exists.
            return Ok(self.get_by_id(id)?.map_or(0, |_| 1));
        }
        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();
        if let Some(name) = &patch.name {
            sets.push("name = ?");
            values.push(name.clone());
        }
        if let Some(due_at) = &patch.due_at {
            sets.push("due_at = ?");
            values.push(due_at.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
        }
        values.push(id.as_str().to_string());
        let sql = format!("UPDATE projects SET {} WHERE id = ?", sets.join(", "));
        let affected = self.conn.execute(&sql, params_from_iter(values.iter()))?;
        Ok(affected)
    }

    pub fn set_status(&self, id: &EntityId, status: Status, start_at: NaiveDateTime, done_at: Option<NaiveDateTime>) -> Result<usize> {
        let affected = self.conn.execute(UPDATE_STATUS, params![id, status, start_at, done_at])?;
        Ok(affected)
    }

    /// Delete the project row and its link rows. Referenced tasks are left
    /// untouched and become orphans.
    pub fn delete(&self, id: &EntityId) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let affected = tx.execute(DELETE_PROJECT, params![id])?;
        tx.execute(DELETE_ALL_LINKS, params![id])?;
        tx.commit()?;
        Ok(affected)
    }

    /// Filtered, sorted, paginated scan.
    pub fn fetch(&self, filter: &ProjectFilter, sort_by: ProjectSortBy, sort: SortDir, limit: u32, skip: u64) -> Result<Vec<Project>> {
        let (clause, values) = Self::where_clause(filter);
        let sql = format!(
            "SELECT {} FROM projects{} ORDER BY {} {} LIMIT {} OFFSET {}",
            PROJECT_COLUMNS,
            clause,
            sort_by.as_column(),
            sort.as_sql(),
            limit,
            skip
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let project_iter = stmt.query_map(params_from_iter(values.iter()), Project::from_row)?;

        let mut projects = Vec::new();
        for project in project_iter {
            projects.push(project?);
        }
        Ok(projects)
    }

    /// Total matching count for the same filter, unaffected by pagination.
    pub fn count(&self, filter: &ProjectFilter) -> Result<u64> {
        let (clause, values) = Self::where_clause(filter);
        let sql = format!("SELECT COUNT(*) FROM projects{}", clause);
        let count = self.conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
        Ok(count)
    }

    /// Resolve a project's linked tasks to full documents, in link order.
    pub fn tasks_for(&self, project_id: &EntityId) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(SELECT_PROJECT_TASKS)?;
        let task_iter = stmt.query_map(params![project_id], Task::from_row)?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    pub fn contains_task(&self, project_id: &EntityId, task_id: &EntityId) -> Result<bool> {
        let found: Option<i32> = self.conn.query_row(SELECT_LINK, params![project_id, task_id], |row| row.get(0)).optional()?;
        Ok(found.is_some())
    }

    /// Set-semantics add: re-adding a present link changes nothing.
    pub fn add_task(&self, project_id: &EntityId, task_id: &EntityId) -> Result<()> {
        self.conn.execute(INSERT_LINK, params![project_id, task_id])?;
        Ok(())
    }

    /// Two-write move as a single transaction: the task can never be
    /// observed in both projects, nor lost between the writes.
    pub fn move_task(&self, from_project_id: &EntityId, to_project_id: &EntityId, task_id: &EntityId) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(DELETE_LINK, params![from_project_id, task_id])?;
        tx.execute(INSERT_LINK, params![to_project_id, task_id])?;
        tx.commit()?;
        Ok(())
    }

    /// (task, project) rows for projects due inside the half-open window `[start, end)`.
    pub fn tasks_due_in(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<(Task, Project)>> {
        let mut stmt = self.conn.prepare(SELECT_TASKS_DUE)?;
        let row_iter = stmt.query_map(params![start, end], |row| Ok((Task::from_row(row)?, project_from_offset(row, 6)?)))?;

        let mut rows = Vec::new();
        for row in row_iter {
            rows.push(row?);
        }
        Ok(rows)
    }

    /// (project, task) rows for linked tasks due inside the half-open window `[start, end)`.
    pub fn projects_due_in(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<(Project, Task)>> {
        let mut stmt = self.conn.prepare(SELECT_PROJECTS_DUE)?;
        let row_iter = stmt.query_map(params![start, end], |row| Ok((Project::from_row(row)?, task_from_offset(row, 6)?)))?;

        let mut rows = Vec::new();
        for row in row_iter {
            rows.push(row?);
        }
        Ok(rows)
    }

    fn where_clause(filter: &ProjectFilter) -> (String, Vec<String>) {
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(search) = filter.search.filter(|s| !s.is_empty()) {
            clauses.push("name LIKE ? ESCAPE '\\'".to_string());
            values.push(format!("%{}%", escape_like(search)));
        }
        if let Some(status) = filter.status {
            clauses.push("status = ?".to_string());
            values.push(status.as_str().to_string());
        }

        if clauses.is_empty() {
            (String::new(), values)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), values)
        }
    }
}

fn project_from_offset(row: &Row<'_>, offset: usize) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        start_at: row.get(offset + 2)?,
        due_at: row.get(offset + 3)?,
        done_at: row.get(offset + 4)?,
        status: row.get(offset + 5)?,
    })
}

fn task_from_offset(row: &Row<'_>, offset: usize) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        start_at: row.get(offset + 2)?,
        done_at: row.get(offset + 4)?,
        due_at: row.get(offset + 3)?,
        status: row.get(offset + 5)?,
    })
}
