/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskboard_web::{app::{build_router, AppState}, config::Config};
/// use taskboard_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Key for signing session cookies
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health
/// ├── GET  /                         landing page
/// ├── GET|POST /register, /login
/// ├── POST /logout
/// ├── GET  /dashboard?q=
/// ├── GET|POST /projects/new
/// ├── GET  /projects/:id?status=&q=
/// ├── GET|POST /projects/:id/edit
/// ├── POST /projects/:id/delete
/// ├── GET  /projects/:id/board
/// ├── GET|POST /projects/:id/tasks/new
/// ├── GET|POST /tasks/:id/edit
/// └── POST /tasks/:id/delete
/// ```
///
/// Login gating happens per handler through the `CurrentUser` extractor.
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/", get(routes::auth::index))
        .route(
            "/register",
            get(routes::auth::register_form).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_form).post(routes::auth::login),
        )
        .route("/logout", post(routes::auth::logout));

    let project_routes = Router::new()
        .route("/dashboard", get(routes::projects::dashboard))
        .route(
            "/projects/new",
            get(routes::projects::new_project).post(routes::projects::create_project),
        )
        .route("/projects/:id", get(routes::projects::show_project))
        .route(
            "/projects/:id/edit",
            get(routes::projects::edit_project).post(routes::projects::update_project),
        )
        .route("/projects/:id/delete", post(routes::projects::delete_project))
        .route("/projects/:id/board", get(routes::projects::board));

    let task_routes = Router::new()
        .route(
            "/projects/:id/tasks/new",
            get(routes::tasks::new_task).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id/edit",
            get(routes::tasks::edit_task).post(routes::tasks::update_task),
        )
        .route("/tasks/:id/delete", post(routes::tasks::delete_task));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(auth_routes)
        .merge(project_routes)
        .merge(task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(state.config.server.production))
        .with_state(state)
}
