/// Submitted HTML forms and query strings
///
/// Every field carries `#[serde(default)]` so a missing field becomes a
/// validation message on the re-rendered form instead of an extractor
/// rejection. Forms are normalised (trimmed, email lowercased) before they
/// are checked, and the normalised values are what the user sees again.

use chrono::NaiveDate;
use serde::Deserialize;
use taskboard_shared::{
    auth::password,
    models::{
        project::UpdateProject,
        task::{Task, TaskFilter, TaskStatus, UpdateTask},
        user::normalize_email,
    },
};
use validator::{Validate, ValidationErrors};

/// Flattens validator output into display messages, sorted for stable output
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => format!("Invalid value ({})", err.code),
        })
        .collect();
    messages.sort();
    messages
}

fn check<T: Validate>(form: &T) -> Vec<String> {
    match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => validation_messages(&errors),
    }
}

/// Sign-up form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

impl RegisterForm {
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            password: self.password,
        }
    }

    /// Validation messages, empty when the form is acceptable
    pub fn errors(&self) -> Vec<String> {
        let mut errors = check(self);
        if let Err(message) = password::validate_password(&self.password) {
            errors.push(message);
        }
        errors
    }
}

/// Login form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

/// Project create/edit form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProjectForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Name is required (at most 200 characters)"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
}

impl ProjectForm {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }

    /// Validates the form, yielding the update payload or error messages
    pub fn parse(&self) -> Result<UpdateProject, Vec<String>> {
        let errors = check(self);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UpdateProject {
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }
}

/// Task create/edit form
///
/// `status` and `due_date` stay strings so a bad value can be shown back to
/// the user next to the error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TaskForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title is required (at most 200 characters)"))]
    pub title: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub due_date: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: String,
}

impl TaskForm {
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            status: self.status.trim().to_string(),
            due_date: self.due_date.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }

    /// Validates the form, yielding the update payload or error messages
    ///
    /// An empty status means `todo`; an empty due date means none.
    pub fn parse(&self) -> Result<UpdateTask, Vec<String>> {
        let mut errors = check(self);

        let status = if self.status.is_empty() {
            Some(TaskStatus::default())
        } else {
            match self.status.parse::<TaskStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    errors.push(format!("Unknown status \"{}\"", self.status));
                    None
                }
            }
        };

        let due_date = if self.due_date.is_empty() {
            Some(None)
        } else {
            match NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d") {
                Ok(date) => Some(Some(date)),
                Err(_) => {
                    errors.push("Due date must be a date in YYYY-MM-DD format".to_string());
                    None
                }
            }
        };

        match (status, due_date) {
            (Some(status), Some(due_date)) if errors.is_empty() => Ok(UpdateTask {
                title: self.title.clone(),
                status,
                due_date,
                notes: self.notes.clone(),
            }),
            _ => Err(errors),
        }
    }

    /// Pre-filled form for editing an existing task
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            status: task.status.as_str().to_string(),
            due_date: task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            notes: task.notes.clone(),
        }
    }
}

/// `?q=` on the dashboard
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

impl SearchQuery {
    pub fn term(&self) -> Option<&str> {
        let q = self.q.trim();
        (!q.is_empty()).then_some(q)
    }
}

/// `?status=&q=` on the project page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilterQuery {
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub q: String,
}

impl TaskFilterQuery {
    /// Builds the model filter; an unknown status filters nothing
    pub fn to_filter(&self) -> TaskFilter {
        let q = self.q.trim();
        TaskFilter {
            status: self.status.parse().ok(),
            title_query: (!q.is_empty()).then(|| q.to_string()),
        }
    }

    /// The status as selected in the filter form, empty for "all"
    pub fn selected_status(&self) -> String {
        self.status
            .parse::<TaskStatus>()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default()
    }
}
