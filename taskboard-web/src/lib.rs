//! # Taskboard Web Server Library
//!
//! Server-rendered project and task manager.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `forms`: Submitted forms and their validation
//! - `middleware`: Response middleware
//! - `routes`: Page handlers
//! - `session`: Session cookie, login extractor and flash messages
//! - `views`: Page templates

pub mod app;
pub mod config;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod views;
