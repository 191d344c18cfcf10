/// Integration tests for project pages and owner scoping

mod common;

use axum::http::StatusCode;
use common::{assert_redirect, body_string, location, TestContext};
use taskboard_shared::models::project::Project;
use taskboard_shared::models::task::{Task, TaskStatus};

#[tokio::test]
async fn test_create_and_view_project() {
    let ctx = TestContext::new().await;
    let (user, cookie) = ctx.signed_in_user("alice@example.com").await;

    let response = ctx.get("/projects/new", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .post_form(
            "/projects/new",
            &[("name", "  Website relaunch "), ("description", "Q3 work")],
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response).to_string();

    let projects = Project::list_for_owner(&ctx.db, user.id, None).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Website relaunch");
    assert_eq!(target, format!("/projects/{}", projects[0].id));

    let response = ctx.get(&target, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Website relaunch"));
    assert!(body.contains("Q3 work"));

    let response = ctx.get("/dashboard", Some(&cookie)).await;
    assert!(body_string(response).await.contains("Website relaunch"));
}

#[tokio::test]
async fn test_create_project_requires_name() {
    let ctx = TestContext::new().await;
    let (user, cookie) = ctx.signed_in_user("alice@example.com").await;

    let response = ctx
        .post_form("/projects/new", &[("name", "   "), ("description", "kept")], Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(response).await;
    assert!(body.contains("Name is required"));
    assert!(body.contains("kept"), "Submitted values should be re-rendered");

    assert!(Project::list_for_owner(&ctx.db, user.id, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_filters_by_name() {
    let ctx = TestContext::new().await;
    let (user, cookie) = ctx.signed_in_user("alice@example.com").await;
    ctx.create_project(&user, "Garden shed").await;
    ctx.create_project(&user, "Tax return").await;

    let response = ctx.get("/dashboard?q=GARDEN", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Garden shed"));
    assert!(!body.contains("Tax return"));
}

#[tokio::test]
async fn test_dashboard_shows_task_counts() {
    let ctx = TestContext::new().await;
    let (user, cookie) = ctx.signed_in_user("alice@example.com").await;
    let busy = ctx.create_project(&user, "Busy").await;
    ctx.create_project(&user, "Idle").await;
    ctx.create_task(&busy, "First", TaskStatus::Todo).await;
    ctx.create_task(&busy, "Second", TaskStatus::Done).await;

    let response = ctx.get("/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("2 task(s)"));
    assert!(body.contains("0 task(s)"));
}

#[tokio::test]
async fn test_project_visible_only_to_owner() {
    let ctx = TestContext::new().await;
    let (alice, alice_cookie) = ctx.signed_in_user("alice@example.com").await;
    let (_, bob_cookie) = ctx.signed_in_user("bob@example.com").await;
    let project = ctx.create_project(&alice, "Private plans").await;

    let response = ctx.get(&format!("/projects/{}", project.id), Some(&alice_cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    for uri in [
        format!("/projects/{}", project.id),
        format!("/projects/{}/edit", project.id),
        format!("/projects/{}/board", project.id),
        format!("/projects/{}/tasks/new", project.id),
    ] {
        let response = ctx.get(&uri, Some(&bob_cookie)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);
    }

    let response = ctx
        .post_form(
            &format!("/projects/{}/edit", project.id),
            &[("name", "Hijacked")],
            Some(&bob_cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .post_form(&format!("/projects/{}/delete", project.id), &[], Some(&bob_cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx.get("/dashboard", Some(&bob_cookie)).await;
    assert!(!body_string(response).await.contains("Private plans"));

    let stored = Project::find_for_owner(&ctx.db, project.id, alice.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Private plans");
}

#[tokio::test]
async fn test_update_project() {
    let ctx = TestContext::new().await;
    let (user, cookie) = ctx.signed_in_user("alice@example.com").await;
    let project = ctx.create_project(&user, "Draft").await;

    let response = ctx.get(&format!("/projects/{}/edit", project.id), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Draft"));

    let response = ctx
        .post_form(
            &format!("/projects/{}/edit", project.id),
            &[("name", "Final"), ("description", "Ready")],
            Some(&cookie),
        )
        .await;
    assert_redirect(&response, &format!("/projects/{}", project.id));

    let stored = Project::find_for_owner(&ctx.db, project.id, user.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Final");
    assert_eq!(stored.description, "Ready");

    let response = ctx
        .post_form(&format!("/projects/{}/edit", project.id), &[("name", "")], Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_project_removes_tasks() {
    let ctx = TestContext::new().await;
    let (user, cookie) = ctx.signed_in_user("alice@example.com").await;
    let project = ctx.create_project(&user, "Doomed").await;
    let task = ctx.create_task(&project, "Orphan soon", TaskStatus::Todo).await;
    ctx.create_task(&project, "Also gone", TaskStatus::Done).await;

    let response = ctx
        .post_form(&format!("/projects/{}/delete", project.id), &[], Some(&cookie))
        .await;
    assert_redirect(&response, "/dashboard");

    assert!(Project::find_for_owner(&ctx.db, project.id, user.id).await.unwrap().is_none());
    assert_eq!(Task::count_for_project(&ctx.db, project.id).await.unwrap(), 0);
    assert!(Task::find_for_owner(&ctx.db, task.id, user.id).await.unwrap().is_none());

    let response = ctx.get(&format!("/projects/{}", project.id), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let ctx = TestContext::new().await;
    let (_, cookie) = ctx.signed_in_user("alice@example.com").await;

    let response = ctx.get("/projects/9999", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx.get("/projects/abc", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
