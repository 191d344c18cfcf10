/// Database layer for Taskboard
///
/// # Modules
///
/// - `pool`: SQLite connection pool with foreign keys enforced
/// - `migrations`: embedded schema migrations, run at startup
/// - `seed`: demo account and sample project
///
/// Models are in the `models` module at crate root level.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig::default()).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
pub mod seed;
