/// Signed session tokens
///
/// The session cookie carries a compact HS256 JWT naming the server-side
/// session and its user. The signature stops clients from forging or editing
/// the cookie; the `sessions` table decides whether the login is still valid,
/// so a token alone is never enough to authenticate.
///
/// # Claims
///
/// ```json
/// {
///   "sub": "42",
///   "sid": "7f9c4a9e-...",
///   "iss": "taskboard",
///   "iat": 1735689600,
///   "exp": 1736294400
/// }
/// ```
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{create_token, validate_token, SessionClaims};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-development-secret-of-at-least-32-chars";
/// let claims = SessionClaims::new(42, "session-id".to_string(), Duration::hours(1));
/// let token = create_token(&claims, secret)?;
///
/// let decoded = validate_token(&token, secret)?;
/// assert_eq!(decoded.user_id(), Some(42));
/// assert_eq!(decoded.sid, "session-id");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer claim stamped on, and required of, every token
pub const ISSUER: &str = "taskboard";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, format or claim check failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token is past its expiry
    #[error("Token has expired")]
    Expired,
}

/// Claims carried by the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID, as a decimal string
    pub sub: String,

    /// Server-side session ID
    pub sid: String,

    /// Issuer, always [`ISSUER`]
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Creates claims for a session that expires after `expires_in`
    pub fn new(user_id: i64, session_id: String, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            sid: session_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp().saturating_add(expires_in.num_seconds()),
        }
    }

    /// The user ID named by `sub`, if it is a valid integer
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims into a token with HS256
pub fn create_token(claims: &SessionClaims, secret: &str) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| TokenError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a token's signature, issuer and expiry and returns its claims
///
/// # Errors
///
/// - `TokenError::Expired` if `exp` has passed
/// - `TokenError::ValidationError` for a bad signature, wrong issuer or a
///   malformed token
pub fn validate_token(token: &str, secret: &str) -> Result<SessionClaims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation.leeway = 0;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::ValidationError(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}
