/// Route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Landing page, sign-up, login and logout
/// - `projects`: Project CRUD, dashboard and board view
/// - `tasks`: Task CRUD within a project

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use taskboard_shared::models::project::Project;

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    session::{set_flash, take_flash, CurrentUser, Flash},
    views::PageContext,
};

/// Layout context for a page render, consuming any pending flash message
pub(crate) fn page_context(jar: CookieJar, user: Option<&CurrentUser>) -> (CookieJar, PageContext) {
    let (jar, flash) = take_flash(jar);
    (jar, PageContext::new(user, flash))
}

/// 303 redirect that shows `flash` on the next page
pub(crate) fn redirect_with_flash(jar: CookieJar, flash: Flash, to: &str) -> Response {
    (set_flash(jar, flash), Redirect::to(to)).into_response()
}

/// Loads a project the user owns; anything else is a 404
pub(crate) async fn owned_project(state: &AppState, id: i64, user: &CurrentUser) -> AppResult<Project> {
    Project::find_for_owner(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
}
