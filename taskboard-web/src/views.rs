/// Page templates
///
/// One askama template struct per page. Templates live under
/// `taskboard-web/templates/` and extend `base.html`, which reads the
/// [`PageContext`] for the navigation bar and the flash message.

use askama::Template;
use axum::response::Html;
use taskboard_shared::models::{
    project::{Project, ProjectSummary},
    task::{Board, Task, TaskStatus},
};

use crate::{
    error::AppResult,
    forms::{ProjectForm, TaskForm},
    session::{CurrentUser, Flash},
};

/// Data every page layout needs
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Email of the logged-in user
    pub current_user: Option<String>,
    pub flash: Option<Flash>,
}

impl PageContext {
    pub fn new(user: Option<&CurrentUser>, flash: Option<Flash>) -> Self {
        Self {
            current_user: user.map(|u| u.email.clone()),
            flash,
        }
    }
}

/// Renders a template into an HTML response body
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub title: &'static str,
    pub message: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub ctx: PageContext,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub ctx: PageContext,
    pub email: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub ctx: PageContext,
    pub email: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub ctx: PageContext,
    pub projects: Vec<ProjectSummary>,
    pub q: String,
}

/// Create and edit share one template; `action` is the form's POST target.
#[derive(Template)]
#[template(path = "project_form.html")]
pub struct ProjectFormPage {
    pub ctx: PageContext,
    pub heading: String,
    pub action: String,
    pub cancel_url: String,
    pub form: ProjectForm,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "project_detail.html")]
pub struct ProjectDetailPage {
    pub ctx: PageContext,
    pub project: Project,
    pub tasks: Vec<Task>,
    pub board: Board,
    pub status: String,
    pub q: String,
    pub statuses: [TaskStatus; 3],
}

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardPage {
    pub ctx: PageContext,
    pub project: Project,
    pub board: Board,
}

#[derive(Template)]
#[template(path = "task_form.html")]
pub struct TaskFormPage {
    pub ctx: PageContext,
    pub heading: String,
    pub action: String,
    pub project: Project,
    pub form: TaskForm,
    pub errors: Vec<String>,
    pub statuses: [TaskStatus; 3],
}
