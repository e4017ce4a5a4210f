//! Tasks collection store.
//!
//! Raw reads and writes for the `tasks` table: lookup by id, filtered and
//! paginated scans, insert, partial field updates and hard delete. Business
//! rules (existence checks, association invariants) live in the service
//! layer; this module only talks SQL.

use crate::db::db::Db;
use crate::db::escape_like;
use crate::libs::entity_id::EntityId;
use crate::libs::error::Result;
use crate::libs::paging::SortDir;
use crate::libs::status::Status;
use crate::libs::task::{Task, TaskPatch, TaskSortBy};
use chrono::NaiveDateTime;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

const TASK_COLUMNS: &str = "id, name, start_at, due_at, done_at, status";
const SELECT_TASK_BY_ID: &str = "SELECT id, name, start_at, due_at, done_at, status FROM tasks WHERE id = ?1";
const INSERT_TASK: &str = "INSERT INTO tasks (id, name, start_at, due_at, done_at, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_STATUS: &str = "UPDATE tasks SET status = ?2, start_at = ?3, done_at = ?4 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Criteria applied to both the paginated scan and the total count.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter<'a> {
    pub search: Option<&'a str>,
    pub status: Option<Status>,
    /// Restrict to tasks referenced by this project's link set.
    pub project_id: Option<&'a EntityId>,
}

pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(db: &'a Db) -> Self {
        Tasks { conn: &db.conn }
    }

    pub fn get_by_id(&self, id: &EntityId) -> Result<Option<Task>> {
        let task = self.conn.query_row(SELECT_TASK_BY_ID, params![id], Task::from_row).optional()?;
        Ok(task)
    }

    /// Insert a task, returning the number of affected rows (the caller
    /// treats anything but 1 as an unacknowledged write).
    pub fn insert(&self, task: &Task) -> Result<usize> {
        let affected = self.conn.execute(INSERT_TASK, params![task.id, task.name, task.start_at, task.due_at, task.done_at, task.status])?;
        Ok(affected)
    }

    /// Partial field update. The id itself is never part of the SET list.
    pub fn update_fields(&self, id: &EntityId, patch: &TaskPatch) -> Result<usize> {
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
        let sql = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));
        let affected = self.conn.execute(&sql, params_from_iter(values.iter()))?;
        Ok(affected)
    }

    /// Status transition write: `start_at`/`done_at` are set by the caller
    /// according to the lifecycle rules.
    pub fn set_status(&self, id: &EntityId, status: Status, start_at: NaiveDateTime, done_at: Option<NaiveDateTime>) -> Result<usize> {
        let affected = self.conn.execute(UPDATE_STATUS, params![id, status, start_at, done_at])?;
        Ok(affected)
    }

    pub fn delete(&self, id: &EntityId) -> Result<usize> {
        let affected = self.conn.execute(DELETE_TASK, params![id])?;
        Ok(affected)
    }

    /// Filtered, sorted, paginated scan.
    pub fn fetch(&self, filter: &TaskFilter, sort_by: TaskSortBy, sort: SortDir, limit: u32, skip: u64) -> Result<Vec<Task>> {
        let (clause, values) = Self::where_clause(filter);
        let sql = format!(
            "SELECT {} FROM tasks{} ORDER BY {} {} LIMIT {} OFFSET {}",
            TASK_COLUMNS,
            clause,
            sort_by.as_column(),
            sort.as_sql(),
            limit,
            skip
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let task_iter = stmt.query_map(params_from_iter(values.iter()), Task::from_row)?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    /// Total matching count for the same filter, unaffected by pagination.
    pub fn count(&self, filter: &TaskFilter) -> Result<u64> {
        let (clause, values) = Self::where_clause(filter);
        let sql = format!("SELECT COUNT(*) FROM tasks{}", clause);
        let count = self.conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
        Ok(count)
    }

    fn where_clause(filter: &TaskFilter) -> (String, Vec<String>) {
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
        if let Some(project_id) = filter.project_id {
            clauses.push("id IN (SELECT task_id FROM project_tasks WHERE project_id = ?)".to_string());
            values.push(project_id.as_str().to_string());
        }

        if clauses.is_empty() {
            (String::new(), values)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), values)
        }
    }
}
