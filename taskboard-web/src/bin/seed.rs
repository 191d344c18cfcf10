//! # Taskboard demo data
//!
//! Creates the demo account and a sample project. Safe to run repeatedly.
//!
//! ```bash
//! cargo run -p taskboard-web --bin taskboard-seed
//! ```

use taskboard_shared::db::{
    migrations::run_migrations,
    pool::{self, DatabaseConfig},
    seed::{seed_demo_data, DEMO_EMAIL, DEMO_PASSWORD},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_shared=info,taskboard_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DatabaseConfig {
        url: std::env::var("DATABASE_URL").unwrap_or_else(|_| DatabaseConfig::default().url),
        ..Default::default()
    };

    let db = pool::create_pool(config).await?;
    run_migrations(&db).await?;

    let report = seed_demo_data(&db).await?;
    pool::close_pool(db).await;

    if report.created_user || report.created_project {
        tracing::info!("Seeded demo data. Log in as {} / {}", DEMO_EMAIL, DEMO_PASSWORD);
    } else {
        tracing::info!("Demo data already present, nothing to do");
    }

    Ok(())
}
