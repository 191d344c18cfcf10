/// Demo data
///
/// Creates a demo account with one sample project holding a task in each
/// status, so a fresh install has something to click through. Seeding is
/// idempotent: existing demo data is left alone and reported.

use sqlx::SqlitePool;
use tracing::info;

use crate::auth::password::{hash_password, PasswordError};
use crate::models::project::{CreateProject, Project};
use crate::models::task::{CreateTask, Task, TaskStatus};
use crate::models::user::{CreateUser, User};

pub const DEMO_EMAIL: &str = "demo@demo.com";
pub const DEMO_PASSWORD: &str = "demodemo";
pub const SAMPLE_PROJECT_NAME: &str = "Sample Project";

/// Error type for seeding
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// What a seeding run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub user_id: i64,
    pub created_user: bool,
    pub created_project: bool,
}

/// Seeds the demo user and sample project if they are missing
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<SeedReport, SeedError> {
    let (user, created_user) = match User::find_by_email(pool, DEMO_EMAIL).await? {
        Some(user) => {
            info!(email = DEMO_EMAIL, "Demo user already exists");
            (user, false)
        }
        None => {
            let user = User::create(
                pool,
                CreateUser {
                    email: DEMO_EMAIL.to_string(),
                    password_hash: hash_password(DEMO_PASSWORD)?,
                },
            )
            .await?;
            info!(email = DEMO_EMAIL, user_id = user.id, "Created demo user");
            (user, true)
        }
    };

    let existing = Project::list_for_owner(pool, user.id, None).await?;
    if existing.iter().any(|p| p.name == SAMPLE_PROJECT_NAME) {
        info!("Sample project already exists");
        return Ok(SeedReport {
            user_id: user.id,
            created_user,
            created_project: false,
        });
    }

    let project = Project::create(
        pool,
        CreateProject {
            owner_id: user.id,
            name: SAMPLE_PROJECT_NAME.to_string(),
            description: "A starter project".to_string(),
        },
    )
    .await?;

    let samples = [
        ("Design schema", TaskStatus::Todo),
        ("Build CRUD", TaskStatus::InProgress),
        ("Polish UI", TaskStatus::Done),
    ];
    for (title, status) in samples {
        Task::create(
            pool,
            CreateTask {
                project_id: project.id,
                title: title.to_string(),
                status,
                due_date: None,
                notes: String::new(),
            },
        )
        .await?;
    }

    info!(project_id = project.id, "Seeded sample project and tasks");

    Ok(SeedReport {
        user_id: user.id,
        created_user,
        created_project: true,
    })
}
