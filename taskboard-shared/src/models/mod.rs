/// Database models for Taskboard
///
/// This module contains all database models and their SQL operations.
///
/// # Models
///
/// - `user`: User accounts and credentials
/// - `project`: Projects, each owned by one user
/// - `task`: Tasks inside a project, with a closed status set
/// - `session`: Server-side login sessions
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{User, CreateUser};
/// use taskboard_shared::models::project::{Project, CreateProject};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let project = Project::create(&pool, CreateProject {
///     owner_id: user.id,
///     name: "Launch".to_string(),
///     description: String::new(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod project;
pub mod session;
pub mod task;
pub mod user;

/// Returns true if the error is a unique-constraint violation
///
/// Used to turn a racing duplicate sign-up into a form error instead of a 500.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

/// Builds a `LIKE` pattern matching `needle` anywhere, with `%`, `_` and `\`
/// in the needle matched literally (queries use `ESCAPE '\'`).
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    use crate::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};

    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create test pool");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

#[cfg(test)]
pub(crate) async fn test_user(pool: &sqlx::SqlitePool, email: &str) -> user::User {
    user::User::create(
        pool,
        user::CreateUser {
            email: email.to_string(),
            password_hash: "test_hash".to_string(),
        },
    )
    .await
    .expect("Failed to create test user")
}
