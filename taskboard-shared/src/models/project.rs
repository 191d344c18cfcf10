/// Project model and database operations
///
/// Every query in this module is scoped by owner: a project is only ever
/// read, changed or deleted together with the ID of the user who owns it, so
/// another user's project is indistinguishable from one that does not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     name TEXT NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     created_at TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::like_pattern;

/// Project owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: i64,

    /// Owning user
    pub owner_id: i64,

    /// Display name (1-200 characters)
    pub name: String,

    /// Free-form description, empty when not given
    pub description: String,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Project together with the number of tasks it holds
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectSummary {
    #[sqlx(flatten)]
    pub project: Project,

    pub task_count: i64,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub owner_id: i64,
    pub name: String,
    pub description: String,
}

/// Input for updating a project
///
/// Both fields are replaced; the edit form always submits them together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProject {
    pub name: String,
    pub description: String,
}

impl Project {
    pub async fn create(pool: &SqlitePool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (owner_id, name, description, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, owner_id, name, description, created_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.name)
        .bind(data.description)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID, only if it belongs to `owner_id`
    pub async fn find_for_owner(
        pool: &SqlitePool,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id, name, description, created_at
            FROM projects
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists an owner's projects, newest first
    ///
    /// When `name_query` is given, only projects whose name contains it
    /// (case-insensitively) are returned.
    pub async fn list_for_owner(
        pool: &SqlitePool,
        owner_id: i64,
        name_query: Option<&str>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let projects = match name_query {
            Some(q) => {
                sqlx::query_as::<_, Project>(
                    r#"
                    SELECT id, owner_id, name, description, created_at
                    FROM projects
                    WHERE owner_id = ? AND name LIKE ? ESCAPE '\'
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(owner_id)
                .bind(like_pattern(q))
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Project>(
                    r#"
                    SELECT id, owner_id, name, description, created_at
                    FROM projects
                    WHERE owner_id = ?
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(owner_id)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(projects)
    }

    /// Same listing as [`Project::list_for_owner`], with task counts
    ///
    /// Counts come from a single grouped join, so projects without tasks
    /// report zero.
    pub async fn list_with_task_counts(
        pool: &SqlitePool,
        owner_id: i64,
        name_query: Option<&str>,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let summaries = match name_query {
            Some(q) => {
                sqlx::query_as::<_, ProjectSummary>(
                    r#"
                    SELECT p.id, p.owner_id, p.name, p.description, p.created_at,
                           COUNT(t.id) AS task_count
                    FROM projects p
                    LEFT JOIN tasks t ON t.project_id = p.id
                    WHERE p.owner_id = ? AND p.name LIKE ? ESCAPE '\'
                    GROUP BY p.id
                    ORDER BY p.created_at DESC, p.id DESC
                    "#,
                )
                .bind(owner_id)
                .bind(like_pattern(q))
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProjectSummary>(
                    r#"
                    SELECT p.id, p.owner_id, p.name, p.description, p.created_at,
                           COUNT(t.id) AS task_count
                    FROM projects p
                    LEFT JOIN tasks t ON t.project_id = p.id
                    WHERE p.owner_id = ?
                    GROUP BY p.id
                    ORDER BY p.created_at DESC, p.id DESC
                    "#,
                )
                .bind(owner_id)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(summaries)
    }

    /// Updates a project owned by `owner_id`
    ///
    /// Returns None if the project does not exist or belongs to someone else.
    pub async fn update_for_owner(
        pool: &SqlitePool,
        id: i64,
        owner_id: i64,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = ?, description = ?
            WHERE id = ? AND owner_id = ?
            RETURNING id, owner_id, name, description, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project owned by `owner_id` together with all of its tasks
    ///
    /// Returns true if a project was deleted.
    pub async fn delete_for_owner(
        pool: &SqlitePool,
        id: i64,
        owner_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
