/// Task model and database operations
///
/// Tasks belong to exactly one project and are deleted with it. Status is a
/// closed set; there is no state machine, any status may follow any other.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     status TEXT NOT NULL DEFAULT 'todo'
///         CHECK (status IN ('todo', 'in_progress', 'done')),
///     due_date TEXT,
///     notes TEXT NOT NULL DEFAULT '',
///     created_at TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{Task, CreateTask, TaskFilter, TaskStatus};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool, project_id: i64) -> Result<(), sqlx::Error> {
/// Task::create(&pool, CreateTask {
///     project_id,
///     title: "Write docs".to_string(),
///     status: TaskStatus::InProgress,
///     due_date: None,
///     notes: String::new(),
/// }).await?;
///
/// let in_progress = Task::list_for_project(&pool, project_id, &TaskFilter {
///     status: Some(TaskStatus::InProgress),
///     title_query: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;

use super::like_pattern;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,

    /// Being worked on
    InProgress,

    /// Finished
    Done,
}

impl TaskStatus {
    /// All statuses in board column order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Converts status to string for database storage and form values
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not one of the task statuses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid task status: {0}")]
pub struct InvalidStatus(pub String);

impl FromStr for TaskStatus {
    type Err = InvalidStatus;

    /// Accepts the storage form (`in_progress`) as well as the labels the
    /// original forms used (`In Progress`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(InvalidStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = InvalidStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Task belonging to a project
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Parent project
    pub project_id: i64,

    /// Short title (1-200 characters)
    pub title: String,

    /// Current status
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Free-form notes, empty when not given
    pub notes: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub project_id: i64,
    pub title: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}

/// Input for updating a task; every field is replaced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}

/// Optional filters for listing a project's tasks
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Only tasks with this status
    pub status: Option<TaskStatus>,

    /// Only tasks whose title contains this text (case-insensitive)
    pub title_query: Option<String>,
}

/// Tasks grouped into one column per status, in [`TaskStatus::ALL`] order
#[derive(Debug, Clone)]
pub struct Board {
    pub columns: Vec<BoardColumn>,
}

/// One status column of a [`Board`]
#[derive(Debug, Clone)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

impl Board {
    /// Groups tasks by status, keeping their relative order within a column
    pub fn group(tasks: Vec<Task>) -> Self {
        let mut columns: Vec<BoardColumn> = TaskStatus::ALL
            .iter()
            .map(|&status| BoardColumn {
                status,
                tasks: Vec::new(),
            })
            .collect();

        for task in tasks {
            if let Some(column) = columns.iter_mut().find(|c| c.status == task.status) {
                column.tasks.push(task);
            }
        }

        Self { columns }
    }

    /// Total number of tasks on the board
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Task {
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, status, due_date, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, project_id, title, status, due_date, notes, created_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.title)
        .bind(data.status.as_str())
        .bind(data.due_date)
        .bind(data.notes)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, only if its project belongs to `owner_id`
    pub async fn find_for_owner(
        pool: &SqlitePool,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.project_id, t.title, t.status, t.due_date, t.notes, t.created_at
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE t.id = ? AND p.owner_id = ?
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists a project's tasks, newest first, applying `filter`
    ///
    /// Callers are expected to have checked project ownership already.
    pub async fn list_for_project(
        pool: &SqlitePool,
        project_id: i64,
        filter: &TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = String::from(
            "SELECT id, project_id, title, status, due_date, notes, created_at \
             FROM tasks WHERE project_id = ?",
        );
        if filter.status.is_some() {
            query.push_str(" AND status = ?");
        }
        if filter.title_query.is_some() {
            query.push_str(" AND title LIKE ? ESCAPE '\\'");
        }
        query.push_str(" ORDER BY created_at DESC, id DESC");

        let mut q = sqlx::query_as::<_, Task>(&query).bind(project_id);
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(title_query) = &filter.title_query {
            q = q.bind(like_pattern(title_query));
        }

        q.fetch_all(pool).await
    }

    /// Updates a task whose project belongs to `owner_id`
    ///
    /// Returns None if the task does not exist or belongs to someone else.
    pub async fn update_for_owner(
        pool: &SqlitePool,
        id: i64,
        owner_id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = ?, status = ?, due_date = ?, notes = ?
            WHERE id = ?
              AND project_id IN (SELECT id FROM projects WHERE owner_id = ?)
            RETURNING id, project_id, title, status, due_date, notes, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.status.as_str())
        .bind(data.due_date)
        .bind(data.notes)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task whose project belongs to `owner_id`
    pub async fn delete_for_owner(
        pool: &SqlitePool,
        id: i64,
        owner_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = ?
              AND project_id IN (SELECT id FROM projects WHERE owner_id = ?)
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts the tasks in a project
    pub async fn count_for_project(pool: &SqlitePool, project_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = ?")
            .bind(project_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
