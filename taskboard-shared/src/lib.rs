//! # Taskboard Shared Library
//!
//! Persistence and authentication used by the Taskboard web server and its
//! seeding tool.
//!
//! ## Module Organization
//!
//! - `db`: connection pool, migrations and demo data
//! - `models`: users, projects, tasks and sessions with their SQL operations
//! - `auth`: password hashing and signed session tokens

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
