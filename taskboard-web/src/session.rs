//! Session cookie, login gate and flash messages.
//!
//! Handlers never touch cookies directly for authentication: they take a
//! [`CurrentUser`] (login required) or [`MaybeUser`] (login optional)
//! extractor. Both validate the signed cookie and then confirm the
//! server-side session row, so logging out anywhere revokes the cookie.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::jwt::{self, SessionClaims},
    models::{session::Session, user::User},
};

use crate::{
    app::AppState,
    error::{AppError, AppResult},
};

pub const SESSION_COOKIE: &str = "taskboard_session";
pub const FLASH_COOKIE: &str = "taskboard_flash";

/// The authenticated user behind a request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub session_id: String,
}

/// The authenticated user, if any
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

/// Resolves the session cookie to a user
///
/// Any cookie that fails signature, expiry or session lookup counts as "no
/// user"; only database failures are errors.
async fn resolve_user(jar: &CookieJar, state: &AppState) -> AppResult<Option<CurrentUser>> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    let claims = match jwt::validate_token(cookie.value(), state.session_secret()) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!("Rejected session cookie: {}", err);
            return Ok(None);
        }
    };

    let Some(session) = Session::find_active(&state.db, &claims.sid).await? else {
        tracing::debug!(session_id = %claims.sid, "Session revoked or expired");
        return Ok(None);
    };

    if claims.user_id() != Some(session.user_id) {
        tracing::warn!(session_id = %session.id, "Session cookie names a different user");
        return Ok(None);
    }

    let Some(user) = User::find_by_id(&state.db, session.user_id).await? else {
        return Ok(None);
    };

    Ok(Some(CurrentUser {
        id: user.id,
        email: user.email,
        session_id: session.id,
    }))
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(MaybeUser(resolve_user(&jar, state).await?))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state).await?;
        user.ok_or(AppError::LoginRequired)
    }
}

/// Starts a session for `user_id` and returns the jar with the cookie set
///
/// Expired sessions are purged on the way.
pub async fn start_session(jar: CookieJar, state: &AppState, user_id: i64) -> AppResult<CookieJar> {
    let purged = Session::purge_expired(&state.db).await?;
    if purged > 0 {
        tracing::debug!(purged, "Purged expired sessions");
    }

    let session = Session::create(&state.db, user_id, state.config.session_ttl()).await?;
    let claims = SessionClaims::new(user_id, session.id.clone(), state.config.session_ttl());
    let token = jwt::create_token(&claims, state.session_secret())?;

    tracing::info!(user_id, session_id = %session.id, "Session started");

    Ok(jar.add(session_cookie(token, state.config.server.production)))
}

/// Deletes the user's session and clears the cookie
pub async fn end_session(jar: CookieJar, state: &AppState, user: &CurrentUser) -> AppResult<CookieJar> {
    Session::delete(&state.db, &user.session_id).await?;
    tracing::info!(user_id = user.id, session_id = %user.session_id, "Session ended");

    Ok(jar.remove(Cookie::build(SESSION_COOKIE).path("/")))
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Severity of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Danger => "danger",
        }
    }
}

/// One-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }

    /// Destructive outcomes such as deletions
    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message)
    }

    /// Cookie-safe encoding: hex of the JSON form
    fn encode(&self) -> String {
        hex::encode(serde_json::to_vec(self).unwrap_or_default())
    }

    fn decode(value: &str) -> Option<Self> {
        let bytes = hex::decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// Stores a flash message for the next page
pub fn set_flash(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

/// Reads and clears the pending flash message
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(value) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, Flash::decode(&value))
}
