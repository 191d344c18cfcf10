/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and the sign-up password policy
/// - [`jwt`]: signed session tokens carried in the session cookie
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::password::{hash_password, verify_password};
/// use taskboard_shared::auth::jwt::{create_token, SessionClaims};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = SessionClaims::new(1, "session-id".to_string(), Duration::days(7));
/// let token = create_token(&claims, "secret-key-of-at-least-thirty-two-chars")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod password;
