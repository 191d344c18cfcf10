/// Project pages
///
/// Every handler requires a login and only ever sees the caller's own
/// projects; another user's project id is indistinguishable from a missing
/// one (404).
///
/// - `GET /dashboard?q=` - List projects
/// - `GET/POST /projects/new` - Create
/// - `GET /projects/:id?status=&q=` - Project with its tasks
/// - `GET/POST /projects/:id/edit` - Update
/// - `POST /projects/:id/delete` - Delete with all tasks
/// - `GET /projects/:id/board` - Tasks grouped by status

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use taskboard_shared::models::{
    project::{CreateProject, Project},
    task::{Board, Task, TaskFilter, TaskStatus},
};

use super::{owned_project, page_context, redirect_with_flash};
use crate::{
    app::AppState,
    error::{AppError, AppResult},
    forms::{ProjectForm, SearchQuery, TaskFilterQuery},
    session::{CurrentUser, Flash},
    views::{
        render, BoardPage, DashboardPage, PageContext, ProjectDetailPage, ProjectFormPage,
    },
};

/// Lists the user's projects, newest first
pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let projects = Project::list_with_task_counts(&state.db, user.id, query.term()).await?;

    let (jar, ctx) = page_context(jar, Some(&user));
    let page = DashboardPage {
        ctx,
        projects,
        q: query.q.trim().to_string(),
    };
    Ok((jar, render(&page)?).into_response())
}

fn project_form_page(
    ctx: PageContext,
    project: Option<&Project>,
    form: ProjectForm,
    errors: Vec<String>,
) -> ProjectFormPage {
    match project {
        Some(project) => ProjectFormPage {
            ctx,
            heading: format!("Edit {}", project.name),
            action: format!("/projects/{}/edit", project.id),
            cancel_url: format!("/projects/{}", project.id),
            form,
            errors,
        },
        None => ProjectFormPage {
            ctx,
            heading: "New project".to_string(),
            action: "/projects/new".to_string(),
            cancel_url: "/dashboard".to_string(),
            form,
            errors,
        },
    }
}

/// Empty project form
pub async fn new_project(user: CurrentUser, jar: CookieJar) -> AppResult<Response> {
    let (jar, ctx) = page_context(jar, Some(&user));
    let page = project_form_page(ctx, None, ProjectForm::default(), Vec::new());
    Ok((jar, render(&page)?).into_response())
}

/// Creates a project owned by the user
pub async fn create_project(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
    Form(form): Form<ProjectForm>,
) -> AppResult<Response> {
    let form = form.normalized();

    let data = match form.parse() {
        Ok(data) => data,
        Err(errors) => {
            let page = project_form_page(PageContext::new(Some(&user), None), None, form, errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)?).into_response());
        }
    };

    let project = Project::create(
        &state.db,
        CreateProject {
            owner_id: user.id,
            name: data.name,
            description: data.description,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, project_id = project.id, "Project created");

    Ok(redirect_with_flash(
        jar,
        Flash::success("Project created."),
        &format!("/projects/{}", project.id),
    ))
}

/// Project page with its (optionally filtered) tasks
pub async fn show_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Query(query): Query<TaskFilterQuery>,
    jar: CookieJar,
) -> AppResult<Response> {
    let project = owned_project(&state, id, &user).await?;
    let tasks = Task::list_for_project(&state.db, project.id, &query.to_filter()).await?;
    let board = Board::group(tasks.clone());

    let (jar, ctx) = page_context(jar, Some(&user));
    let page = ProjectDetailPage {
        ctx,
        project,
        tasks,
        board,
        status: query.selected_status(),
        q: query.q.trim().to_string(),
        statuses: TaskStatus::ALL,
    };
    Ok((jar, render(&page)?).into_response())
}

/// Project form pre-filled with the current values
pub async fn edit_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> AppResult<Response> {
    let project = owned_project(&state, id, &user).await?;
    let form = ProjectForm {
        name: project.name.clone(),
        description: project.description.clone(),
    };

    let (jar, ctx) = page_context(jar, Some(&user));
    let page = project_form_page(ctx, Some(&project), form, Vec::new());
    Ok((jar, render(&page)?).into_response())
}

/// Saves changes to a project
pub async fn update_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<ProjectForm>,
) -> AppResult<Response> {
    let project = owned_project(&state, id, &user).await?;
    let form = form.normalized();

    let data = match form.parse() {
        Ok(data) => data,
        Err(errors) => {
            let page = project_form_page(
                PageContext::new(Some(&user), None),
                Some(&project),
                form,
                errors,
            );
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)?).into_response());
        }
    };

    let project = Project::update_for_owner(&state.db, project.id, user.id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    tracing::info!(user_id = user.id, project_id = project.id, "Project updated");

    Ok(redirect_with_flash(
        jar,
        Flash::success("Project updated."),
        &format!("/projects/{}", project.id),
    ))
}

/// Deletes a project together with its tasks
pub async fn delete_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> AppResult<Response> {
    if !Project::delete_for_owner(&state.db, id, user.id).await? {
        return Err(AppError::NotFound("Project not found".to_string()));
    }

    tracing::info!(user_id = user.id, project_id = id, "Project deleted");

    Ok(redirect_with_flash(
        jar,
        Flash::danger("Project deleted."),
        "/dashboard",
    ))
}

/// All of a project's tasks in status columns
pub async fn board(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> AppResult<Response> {
    let project = owned_project(&state, id, &user).await?;
    let tasks = Task::list_for_project(&state.db, project.id, &TaskFilter::default()).await?;

    let (jar, ctx) = page_context(jar, Some(&user));
    let page = BoardPage {
        ctx,
        project,
        board: Board::group(tasks),
    };
    Ok((jar, render(&page)?).into_response())
}
