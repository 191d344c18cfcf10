/// Integration tests for sign-up, login, logout and session gating

mod common;

use axum::http::StatusCode;
use common::{
    assert_redirect, body_string, clears_cookie, set_cookie, TestContext, TEST_SECRET,
};
use taskboard_shared::auth::jwt::{create_token, SessionClaims};
use taskboard_shared::models::session::Session;
use taskboard_shared::models::user::User;
use taskboard_web::session::{FLASH_COOKIE, SESSION_COOKIE};

#[tokio::test]
async fn test_health_reports_database() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_register_login_and_logout_flow() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post_form(
            "/register",
            &[("email", "  Alice@Example.com "), ("password", "correct horse")],
            None,
        )
        .await;
    assert_redirect(&response, "/login");
    let flash = set_cookie(&response, FLASH_COOKIE).expect("Sign-up should set a flash message");

    let user = User::find_by_email(&ctx.db, "alice@example.com").await.unwrap();
    assert!(user.is_some(), "Email should be stored normalised");

    // The flash is shown once on the login page and cleared
    let response = ctx.get("/login", Some(&flash)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(clears_cookie(&response, FLASH_COOKIE));
    assert!(body_string(response).await.contains("Account created. Please log in."));

    let response = ctx
        .post_form(
            "/login",
            &[("email", "alice@example.com"), ("password", "correct horse")],
            None,
        )
        .await;
    assert_redirect(&response, "/dashboard");
    let session = set_cookie(&response, SESSION_COOKIE).expect("Login should set a session cookie");

    let user = User::find_by_email(&ctx.db, "alice@example.com").await.unwrap().unwrap();
    assert!(user.last_login_at.is_some());

    let response = ctx.get("/dashboard", Some(&session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("alice@example.com"));

    let response = ctx.post_form("/logout", &[], Some(&session)).await;
    assert_redirect(&response, "/");
    assert!(clears_cookie(&response, SESSION_COOKIE));
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post_form(
            "/register",
            &[("email", "bob@example.com"), ("password", "right password")],
            None,
        )
        .await;
    assert_redirect(&response, "/login");

    let response = ctx
        .post_form(
            "/login",
            &[("email", "bob@example.com"), ("password", "wrong password")],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response, SESSION_COOKIE).is_none());
    let body = body_string(response).await;
    assert!(body.contains("Invalid email or password."));
    assert!(body.contains("bob@example.com"), "Email should be kept in the form");
}

#[tokio::test]
async fn test_login_with_unknown_email_fails() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post_form(
            "/login",
            &[("email", "nobody@example.com"), ("password", "whatever123")],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_string(response).await.contains("Invalid email or password."));

    // The throwaway hash used for unknown emails never grants a session
    let response = ctx
        .post_form(
            "/login",
            &[("email", "nobody@example.com"), ("password", "taskboard-dummy-password")],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response, SESSION_COOKIE).is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let ctx = TestContext::new().await;
    ctx.create_user("carol@example.com").await;

    let response = ctx
        .post_form(
            "/register",
            &[("email", "CAROL@example.com"), ("password", "another password")],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(response).await.contains("already exists"));
    assert_eq!(User::count(&ctx.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post_form("/register", &[("email", "not-an-email"), ("password", "short")], None)
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(response).await;
    assert!(body.contains("Enter a valid email address"));
    assert!(body.contains("at least 8"));

    // Missing fields are validation errors too, not extractor rejections
    let response = ctx.post_form("/register", &[], None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(User::count(&ctx.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_protected_pages_redirect_to_login() {
    let ctx = TestContext::new().await;

    for uri in ["/dashboard", "/projects/new", "/projects/1", "/projects/1/board", "/tasks/1/edit"] {
        let response = ctx.get(uri, None).await;
        assert_redirect(&response, "/login");
    }

    let response = ctx.post_form("/projects/new", &[("name", "Sneaky")], None).await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn test_index_redirects_logged_in_users() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Create an account"));

    let (_, cookie) = ctx.signed_in_user("dave@example.com").await;
    let response = ctx.get("/", Some(&cookie)).await;
    assert_redirect(&response, "/dashboard");

    let response = ctx.get("/login", Some(&cookie)).await;
    assert_redirect(&response, "/dashboard");
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let ctx = TestContext::new().await;
    let (user, cookie) = ctx.signed_in_user("erin@example.com").await;

    let response = ctx.get("/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx.post_form("/logout", &[], Some(&cookie)).await;
    assert_redirect(&response, "/");

    let remaining: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE user_id = ?")
        .bind(user.id)
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(remaining.0, 0);

    // Replaying the old cookie no longer works
    let response = ctx.get("/dashboard", Some(&cookie)).await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn test_forged_cookies_rejected() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("frank@example.com").await;

    let response = ctx
        .get("/dashboard", Some(&format!("{}=garbage", SESSION_COOKIE)))
        .await;
    assert_redirect(&response, "/login");

    // Valid session, wrong signing key
    let ttl = chrono::Duration::hours(1);
    let session = Session::create(&ctx.db, user.id, ttl).await.unwrap();
    let token = create_token(
        &SessionClaims::new(user.id, session.id.clone(), ttl),
        "some-other-secret-that-is-long-enough!!",
    )
    .unwrap();
    let response = ctx
        .get("/dashboard", Some(&format!("{}={}", SESSION_COOKIE, token)))
        .await;
    assert_redirect(&response, "/login");

    // Right key, but claims another user's id
    let token = create_token(&SessionClaims::new(user.id + 1, session.id, ttl), TEST_SECRET).unwrap();
    let response = ctx
        .get("/dashboard", Some(&format!("{}={}", SESSION_COOKIE, token)))
        .await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn test_expired_session_rejected() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("gina@example.com").await;

    let session = Session::create(&ctx.db, user.id, chrono::Duration::seconds(-60))
        .await
        .unwrap();
    let token = create_token(
        &SessionClaims::new(user.id, session.id, chrono::Duration::hours(1)),
        TEST_SECRET,
    )
    .unwrap();

    let response = ctx
        .get("/dashboard", Some(&format!("{}={}", SESSION_COOKIE, token)))
        .await;
    assert_redirect(&response, "/login");
}
