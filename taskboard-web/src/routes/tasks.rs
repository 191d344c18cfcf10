/// Task pages
///
/// Tasks are reached either through an owned project (create) or resolved
/// through their project's owner (edit, delete). Tasks in other users'
/// projects yield 404.
///
/// - `GET/POST /projects/:id/tasks/new` - Create
/// - `GET/POST /tasks/:id/edit` - Update
/// - `POST /tasks/:id/delete` - Delete

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use taskboard_shared::models::{
    project::Project,
    task::{CreateTask, Task, TaskStatus},
};

use super::{owned_project, page_context, redirect_with_flash};
use crate::{
    app::AppState,
    error::{AppError, AppResult},
    forms::TaskForm,
    session::{CurrentUser, Flash},
    views::{render, PageContext, TaskFormPage},
};

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".to_string())
}

async fn owned_task(state: &AppState, id: i64, user: &CurrentUser) -> AppResult<Task> {
    Task::find_for_owner(&state.db, id, user.id)
        .await?
        .ok_or_else(task_not_found)
}

fn new_task_page(ctx: PageContext, project: Project, form: TaskForm, errors: Vec<String>) -> TaskFormPage {
    TaskFormPage {
        ctx,
        heading: "New task".to_string(),
        action: format!("/projects/{}/tasks/new", project.id),
        project,
        form,
        errors,
        statuses: TaskStatus::ALL,
    }
}

fn edit_task_page(
    ctx: PageContext,
    task_id: i64,
    project: Project,
    form: TaskForm,
    errors: Vec<String>,
) -> TaskFormPage {
    TaskFormPage {
        ctx,
        heading: "Edit task".to_string(),
        action: format!("/tasks/{}/edit", task_id),
        project,
        form,
        errors,
        statuses: TaskStatus::ALL,
    }
}

/// Empty task form for a project
pub async fn new_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<i64>,
    jar: CookieJar,
) -> AppResult<Response> {
    let project = owned_project(&state, project_id, &user).await?;
    let form = TaskForm {
        status: TaskStatus::default().as_str().to_string(),
        ..Default::default()
    };

    let (jar, ctx) = page_context(jar, Some(&user));
    let page = new_task_page(ctx, project, form, Vec::new());
    Ok((jar, render(&page)?).into_response())
}

/// Adds a task to a project
pub async fn create_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<TaskForm>,
) -> AppResult<Response> {
    let project = owned_project(&state, project_id, &user).await?;
    let form = form.normalized();

    let data = match form.parse() {
        Ok(data) => data,
        Err(errors) => {
            let page = new_task_page(PageContext::new(Some(&user), None), project, form, errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)?).into_response());
        }
    };

    let task = Task::create(
        &state.db,
        CreateTask {
            project_id: project.id,
            title: data.title,
            status: data.status,
            due_date: data.due_date,
            notes: data.notes,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        project_id = project.id,
        task_id = task.id,
        status = %task.status.as_str(),
        "Task created"
    );

    Ok(redirect_with_flash(
        jar,
        Flash::success("Task created."),
        &format!("/projects/{}", project.id),
    ))
}

/// Task form pre-filled with the current values
pub async fn edit_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> AppResult<Response> {
    let task = owned_task(&state, id, &user).await?;
    let project = owned_project(&state, task.project_id, &user).await?;

    let (jar, ctx) = page_context(jar, Some(&user));
    let page = edit_task_page(ctx, task.id, project, TaskForm::from_task(&task), Vec::new());
    Ok((jar, render(&page)?).into_response())
}

/// Saves changes to a task, including status moves between board columns
pub async fn update_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<TaskForm>,
) -> AppResult<Response> {
    let task = owned_task(&state, id, &user).await?;
    let form = form.normalized();

    let data = match form.parse() {
        Ok(data) => data,
        Err(errors) => {
            let project = owned_project(&state, task.project_id, &user).await?;
            let page = edit_task_page(
                PageContext::new(Some(&user), None),
                task.id,
                project,
                form,
                errors,
            );
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)?).into_response());
        }
    };

    let updated = Task::update_for_owner(&state.db, task.id, user.id, data)
        .await?
        .ok_or_else(task_not_found)?;

    tracing::info!(
        user_id = user.id,
        task_id = updated.id,
        from = %task.status.as_str(),
        to = %updated.status.as_str(),
        "Task updated"
    );

    Ok(redirect_with_flash(
        jar,
        Flash::success("Task updated."),
        &format!("/projects/{}", updated.project_id),
    ))
}

/// Removes a task
pub async fn delete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> AppResult<Response> {
    let task = owned_task(&state, id, &user).await?;

    if !Task::delete_for_owner(&state.db, task.id, user.id).await? {
        return Err(task_not_found());
    }

    tracing::info!(user_id = user.id, task_id = task.id, "Task deleted");

    Ok(redirect_with_flash(
        jar,
        Flash::danger("Task deleted."),
        &format!("/projects/{}", task.project_id),
    ))
}
