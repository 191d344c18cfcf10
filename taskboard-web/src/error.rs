/// Error handling for the web server
///
/// Handlers return `AppResult<T>`; the error side renders as an HTML page (or
/// a redirect to the login form) with the matching status code. Form
/// validation problems are not errors in this sense: handlers re-render the
/// form with messages instead (see [`crate::views`]).
///
/// # Example
///
/// ```no_run
/// use taskboard_web::error::{AppError, AppResult};
///
/// async fn handler() -> AppResult<&'static str> {
///     Err(AppError::NotFound("Project not found".to_string()))
/// }
/// ```

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt;

use crate::views::ErrorPage;

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Unified handler error type
#[derive(Debug)]
pub enum AppError {
    /// No valid session; the browser is sent to the login form (303)
    LoginRequired,

    /// Not found (404), also used for other users' resources
    NotFound(String),

    /// Internal server error (500); details are logged, never shown
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::LoginRequired => write!(f, "Login required"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Status code this error renders with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::LoginRequired => StatusCode::SEE_OTHER,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::LoginRequired => return Redirect::to("/login").into_response(),
            AppError::NotFound(msg) => msg,
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        };

        let page = ErrorPage {
            status: status.as_u16(),
            title: status.canonical_reason().unwrap_or("Error"),
            message,
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(err) => {
                tracing::error!("Failed to render error page: {}", err);
                (status, status.canonical_reason().unwrap_or("Error")).into_response()
            }
        }
    }
}

/// Convert sqlx errors to app errors
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            _ => AppError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to app errors
impl From<taskboard_shared::auth::password::PasswordError> for AppError {
    fn from(err: taskboard_shared::auth::password::PasswordError) -> Self {
        AppError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert token creation errors to app errors
///
/// Validation failures never reach here: the session extractor treats them
/// as "not logged in".
impl From<taskboard_shared::auth::jwt::TokenError> for AppError {
    fn from(err: taskboard_shared::auth::jwt::TokenError) -> Self {
        AppError::InternalError(format!("Session token failed: {}", err))
    }
}

/// Convert template rendering errors to app errors
impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::InternalError(format!("Template rendering failed: {}", err))
    }
}
