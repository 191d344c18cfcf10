//! Common test utilities for integration tests
//!
//! Every `TestContext` owns a private in-memory database with migrations
//! applied and a router wired exactly like the server's. Requests go
//! through `tower::ServiceExt::oneshot`, no socket involved.
//!
//! Most tests sign users in with [`TestContext::login_as`], which mints a
//! session directly instead of going through the password form, so Argon2
//! only runs in the tests that exercise the login form itself.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use sqlx::SqlitePool;
use taskboard_shared::auth::jwt::{create_token, SessionClaims};
use taskboard_shared::db::migrations::run_migrations;
use taskboard_shared::db::pool::{self, create_pool};
use taskboard_shared::models::project::{CreateProject, Project};
use taskboard_shared::models::session::Session;
use taskboard_shared::models::task::{CreateTask, Task, TaskStatus};
use taskboard_shared::models::user::{CreateUser, User};
use taskboard_web::app::{build_router, AppState};
use taskboard_web::config::{Config, DatabaseConfig, ServerConfig, SessionConfig};
use taskboard_web::session::SESSION_COOKIE;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test context containing the database and the router
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = create_pool(pool::DatabaseConfig::in_memory())
            .await
            .expect("Failed to create test pool");
        run_migrations(&db).await.expect("Failed to run migrations");

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                production: false,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            session: SessionConfig {
                secret: TEST_SECRET.to_string(),
                ttl_hours: 1,
            },
        };

        let app = build_router(AppState::new(db.clone(), config));
        Self { db, app }
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(encode_form(fields))).unwrap())
            .await
    }

    /// Creates a user directly; the password hash is a placeholder
    pub async fn create_user(&self, email: &str) -> User {
        User::create(
            &self.db,
            CreateUser {
                email: email.to_string(),
                password_hash: "not-a-real-hash".to_string(),
            },
        )
        .await
        .expect("Failed to create user")
    }

    /// Starts a session for `user` and returns the matching `Cookie` header
    pub async fn login_as(&self, user: &User) -> String {
        let ttl = chrono::Duration::hours(1);
        let session = Session::create(&self.db, user.id, ttl)
            .await
            .expect("Failed to create session");
        let token = create_token(&SessionClaims::new(user.id, session.id, ttl), TEST_SECRET)
            .expect("Failed to sign session token");
        format!("{}={}", SESSION_COOKIE, token)
    }

    /// A fresh user with a session cookie
    pub async fn signed_in_user(&self, email: &str) -> (User, String) {
        let user = self.create_user(email).await;
        let cookie = self.login_as(&user).await;
        (user, cookie)
    }

    pub async fn create_project(&self, owner: &User, name: &str) -> Project {
        Project::create(
            &self.db,
            CreateProject {
                owner_id: owner.id,
                name: name.to_string(),
                description: String::new(),
            },
        )
        .await
        .expect("Failed to create project")
    }

    pub async fn create_task(&self, project: &Project, title: &str, status: TaskStatus) -> Task {
        Task::create(
            &self.db,
            CreateTask {
                project_id: project.id,
                title: title.to_string(),
                status,
                due_date: None,
                notes: String::new(),
            },
        )
        .await
        .expect("Failed to create task")
    }
}

/// `application/x-www-form-urlencoded` body for `fields`
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).expect("Failed to encode form")
}

/// Value of the `Location` header
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Response has no Location header")
        .to_str()
        .unwrap()
}

/// Asserts a 303 redirect to `to`
pub fn assert_redirect(response: &Response, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}

/// The non-empty `name=value` pair set by the response for cookie `name`
pub fn set_cookie(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| {
            pair.split_once('=')
                .map(|(n, v)| n == name && !v.is_empty())
                .unwrap_or(false)
        })
        .map(|pair| pair.to_string())
}

/// Whether the response clears cookie `name`
pub fn clears_cookie(response: &Response, name: &str) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with(&format!("{}=;", name)) || value.starts_with(&format!("{}=\"\";", name)))
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8_lossy(&bytes).into_owned()
}
