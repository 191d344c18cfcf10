/// Authentication pages
///
/// - `GET /` - Landing page (logged-in users go to the dashboard)
/// - `GET/POST /register` - Sign up
/// - `GET/POST /login` - Log in and start a session
/// - `POST /logout` - End the session

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use taskboard_shared::{
    auth::password,
    models::{
        is_unique_violation,
        user::{CreateUser, User},
    },
};

use super::{page_context, redirect_with_flash};
use crate::{
    app::AppState,
    error::AppResult,
    forms::{LoginForm, RegisterForm},
    session::{self, CurrentUser, Flash, MaybeUser},
    views::{render, IndexPage, LoginPage, PageContext, RegisterPage},
};

const EMAIL_TAKEN: &str = "An account with this email already exists";
const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Landing page
pub async fn index(MaybeUser(user): MaybeUser, jar: CookieJar) -> AppResult<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let (jar, ctx) = page_context(jar, None);
    Ok((jar, render(&IndexPage { ctx })?).into_response())
}

/// Sign-up form
pub async fn register_form(MaybeUser(user): MaybeUser, jar: CookieJar) -> AppResult<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let (jar, ctx) = page_context(jar, None);
    let page = RegisterPage {
        ctx,
        email: String::new(),
        errors: Vec::new(),
    };
    Ok((jar, render(&page)?).into_response())
}

/// Creates an account
///
/// On success the user is sent to the login form; on any validation problem
/// (including an email that is already registered) the form comes back with
/// status 422.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let form = form.normalized();
    let mut errors = form.errors();

    if errors.is_empty() && User::find_by_email(&state.db, &form.email).await?.is_some() {
        errors.push(EMAIL_TAKEN.to_string());
    }

    if errors.is_empty() {
        let password_hash = password::hash_password(&form.password)?;
        let created = User::create(
            &state.db,
            CreateUser {
                email: form.email.clone(),
                password_hash,
            },
        )
        .await;

        match created {
            Ok(user) => {
                tracing::info!(user_id = user.id, "User registered");
                return Ok(redirect_with_flash(
                    jar,
                    Flash::success("Account created. Please log in."),
                    "/login",
                ));
            }
            // Lost a race with a concurrent sign-up for the same email
            Err(err) if is_unique_violation(&err) => errors.push(EMAIL_TAKEN.to_string()),
            Err(err) => return Err(err.into()),
        }
    }

    tracing::debug!(errors = errors.len(), "Sign-up rejected");

    let page = RegisterPage {
        ctx: PageContext::default(),
        email: form.email,
        errors,
    };
    Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)?).into_response())
}

/// Login form
pub async fn login_form(MaybeUser(user): MaybeUser, jar: CookieJar) -> AppResult<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let (jar, ctx) = page_context(jar, None);
    let page = LoginPage {
        ctx,
        email: String::new(),
        errors: Vec::new(),
    };
    Ok((jar, render(&page)?).into_response())
}

/// Verifies credentials and starts a session
///
/// Unknown email and wrong password produce the same message and both run
/// a full Argon2 verification.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let form = form.normalized();

    let user = User::find_by_email(&state.db, &form.email).await?;
    let verified = match &user {
        Some(user) => password::verify_password(&form.password, &user.password_hash)
            .unwrap_or_else(|err| {
                tracing::warn!(user_id = user.id, "Stored password hash unusable: {}", err);
                false
            }),
        None => password::verify_against_dummy(&form.password),
    };

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::warn!("Failed login attempt");
            let page = LoginPage {
                ctx: PageContext::default(),
                email: form.email,
                errors: vec![INVALID_CREDENTIALS.to_string()],
            };
            return Ok((StatusCode::UNAUTHORIZED, render(&page)?).into_response());
        }
    };

    User::update_last_login(&state.db, user.id).await?;
    let jar = session::start_session(jar, &state, user.id).await?;

    Ok((jar, Redirect::to("/dashboard")).into_response())
}

/// Ends the current session
pub async fn logout(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> AppResult<Response> {
    let jar = session::end_session(jar, &state, &user).await?;
    Ok(redirect_with_flash(jar, Flash::info("Logged out."), "/"))
}
