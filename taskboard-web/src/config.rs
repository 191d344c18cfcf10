/// Configuration management for the web server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `APP_HOST`: Host to bind to (default: 0.0.0.0)
/// - `APP_PORT`: Port to bind to (default: 8080)
/// - `APP_ENV`: `production` marks cookies `Secure` and enables HSTS
/// - `DATABASE_URL`: SQLite connection string (default: sqlite://taskboard.db)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `SESSION_SECRET`: Secret key for signing session cookies (required, 32+ chars)
/// - `SESSION_TTL_HOURS`: Session lifetime in hours (default: 168)
/// - `RUST_LOG`: Log level (default: taskboard_web=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use taskboard_web::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Minimum accepted length of `SESSION_SECRET`
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted `SESSION_TTL_HOURS` (ten years)
pub const MAX_SESSION_TTL_HOURS: i64 = 87_600;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session configuration
    pub session: SessionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Running behind HTTPS in production
    pub production: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret key for signing session cookies
    ///
    /// Must be at least 32 characters. Generate with: `openssl rand -hex 32`
    #[serde(skip_serializing)]
    pub secret: String,

    /// How long a login stays valid, in hours
    pub ttl_hours: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if `SESSION_SECRET` is missing or too short, or if a
    /// numeric variable does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("APP_PORT must be a port number: {}", e))?;
        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://taskboard.db".to_string());
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS must be a number: {}", e))?;

        let secret = env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET environment variable is required"))?;
        let ttl_hours = env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "168".to_string())
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("SESSION_TTL_HOURS must be a number: {}", e))?;

        let config = Self {
            server: ServerConfig {
                host,
                port,
                production,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            session: SessionConfig { secret, ttl_hours },
        };
        config.validate()?;

        Ok(config)
    }

    /// Checks the invariants `from_env` relies on
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.session.secret.len() < MIN_SECRET_LENGTH {
            anyhow::bail!(
                "SESSION_SECRET must be at least {} characters long",
                MIN_SECRET_LENGTH
            );
        }

        if self.session.ttl_hours <= 0 {
            anyhow::bail!("SESSION_TTL_HOURS must be positive");
        }

        if self.session.ttl_hours > MAX_SESSION_TTL_HOURS {
            anyhow::bail!(
                "SESSION_TTL_HOURS must be at most {}",
                MAX_SESSION_TTL_HOURS
            );
        }

        Ok(())
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Session lifetime as a duration
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session.ttl_hours)
    }

    /// Pool settings for the shared database layer
    pub fn pool_config(&self) -> taskboard_shared::db::pool::DatabaseConfig {
        taskboard_shared::db::pool::DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            ..Default::default()
        }
    }
}
