//! HTTP-level tests for project posting, review, and lifecycle.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, create_company, create_project_with_status, create_student,
    create_university, create_user, delete_auth, get_auth, post_json_auth, put_json_auth,
    token_for,
};
use internhub_core::status::ProjectStatus;
use internhub_db::repositories::{ProjectRepo, StudentRepo};

fn post_body(university_id: Option<i64>) -> serde_json::Value {
    json!({
        "university_id": university_id,
        "title": "Inventory dashboard",
        "domain": "web",
        "description": "Build a stock dashboard for the warehouse team",
        "required_skills": ["rust", "sql"],
        "payment_amount": 800.0,
        "duration_weeks": 6,
        "deadline": "2026-12-31",
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn company_post_enters_review_queue(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    let (company_user, _) = create_company(&pool, "acme", true).await;

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&company_user),
        post_body(Some(uni_id)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(
        body["data"]["status_id"].as_i64(),
        Some(i64::from(ProjectStatus::PendingReview.id()))
    );
    assert!(!body["data"]["submitted_for_review_at"].is_null());
    assert!(body["data"]["approved_at"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn auto_approving_university_opens_company_posts(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", true).await;
    let (company_user, _) = create_company(&pool, "acme", true).await;

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&company_user),
        post_body(Some(uni_id)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(
        body["data"]["status_id"].as_i64(),
        Some(i64::from(ProjectStatus::Open.id()))
    );
    assert!(!body["data"]["approved_at"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unverified_company_cannot_post(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    let (company_user, _) = create_company(&pool, "acme", false).await;

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&company_user),
        post_body(Some(uni_id)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn company_post_must_meet_university_minimum_payment(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    sqlx::query("UPDATE universities SET min_payment_amount = 1000 WHERE id = $1")
        .bind(uni_id)
        .execute(&pool)
        .await
        .unwrap();
    let (company_user, _) = create_company(&pool, "acme", true).await;

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&company_user),
        post_body(Some(uni_id)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn university_posts_open_immediately(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (uni_user, _) = create_university(&pool, "uni", false).await;

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &token_for(&uni_user),
        post_body(None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(
        body["data"]["status_id"].as_i64(),
        Some(i64::from(ProjectStatus::Open.id()))
    );
    assert_eq!(body["data"]["posted_by_university"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn review_approve_opens_and_second_decision_conflicts(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (uni_user, uni_id) = create_university(&pool, "uni", false).await;
    let (_, company_id) = create_company(&pool, "acme", true).await;
    let project_id = create_project_with_status(
        &pool,
        Some(company_id),
        uni_id,
        ProjectStatus::PendingReview.id(),
    )
    .await;

    let token = token_for(&uni_user);
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/review"),
        &token,
        json!({ "decision": "approve" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["data"]["status_id"].as_i64(),
        Some(i64::from(ProjectStatus::Open.id()))
    );

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/review"),
        &token,
        json!({ "decision": "reject" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn review_reject_records_reason(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (uni_user, uni_id) = create_university(&pool, "uni", false).await;
    let (_, company_id) = create_company(&pool, "acme", true).await;
    let project_id = create_project_with_status(
        &pool,
        Some(company_id),
        uni_id,
        ProjectStatus::PendingReview.id(),
    )
    .await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/review"),
        &token_for(&uni_user),
        json!({ "decision": "reject", "reason": "Scope is too vague" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let project = ProjectRepo::find_by_id(&pool, project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.status_id, ProjectStatus::Rejected.id());
    assert_eq!(project.rejection_reason, "Scope is too vague");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_the_targeted_university_may_review(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    let (other_user, _) = create_university(&pool, "other", false).await;
    let (_, company_id) = create_company(&pool, "acme", true).await;
    let project_id = create_project_with_status(
        &pool,
        Some(company_id),
        uni_id,
        ProjectStatus::PendingReview.id(),
    )
    .await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/review"),
        &token_for(&other_user),
        json!({ "decision": "approve" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editing_a_rejected_project_resubmits_it(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    let (company_user, company_id) = create_company(&pool, "acme", true).await;
    let project_id = create_project_with_status(
        &pool,
        Some(company_id),
        uni_id,
        ProjectStatus::Rejected.id(),
    )
    .await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&company_user),
        json!({ "description": "Clarified scope with concrete milestones" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body["data"]["status_id"].as_i64(),
        Some(i64::from(ProjectStatus::PendingReview.id()))
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn company_cannot_edit_an_open_project(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    let (company_user, company_id) = create_company(&pool, "acme", true).await;
    let project_id =
        create_project_with_status(&pool, Some(company_id), uni_id, ProjectStatus::Open.id())
            .await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&company_user),
        json!({ "title": "New title" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cancel_and_delete_are_status_gated(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    let (company_user, company_id) = create_company(&pool, "acme", true).await;
    let token = token_for(&company_user);

    let open_id =
        create_project_with_status(&pool, Some(company_id), uni_id, ProjectStatus::Open.id())
            .await;

    // An open project cannot be deleted outright, but it can be cancelled.
    let response = delete_auth(app.clone(), &format!("/api/v1/projects/{open_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{open_id}/cancel"),
        &token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Once cancelled it may be deleted.
    let response = delete_auth(app.clone(), &format!("/api/v1/projects/{open_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(ProjectRepo::find_by_id(&pool, open_id).await.unwrap().is_none());

    // In-progress projects cannot be cancelled.
    let running_id = create_project_with_status(
        &pool,
        Some(company_id),
        uni_id,
        ProjectStatus::InProgress.id(),
    )
    .await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{running_id}/cancel"),
        &token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn browse_lists_only_open_projects(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    let (_, company_id) = create_company(&pool, "acme", true).await;
    let (stu_user, _) = create_student(&pool, "stu", uni_id, true).await;

    let open_id =
        create_project_with_status(&pool, Some(company_id), uni_id, ProjectStatus::Open.id())
            .await;
    create_project_with_status(
        &pool,
        Some(company_id),
        uni_id,
        ProjectStatus::PendingReview.id(),
    )
    .await;

    let response = get_auth(app, "/api/v1/projects", &token_for(&stu_user)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let projects = body["data"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"].as_i64(), Some(open_id));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn student_browse_is_scoped_to_own_university(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_a) = create_university(&pool, "uni_a", false).await;
    let (_, uni_b) = create_university(&pool, "uni_b", false).await;
    let (stu_user, _) = create_student(&pool, "stu", uni_a, true).await;

    let own_id = create_project_with_status(&pool, None, uni_a, ProjectStatus::Open.id()).await;
    create_project_with_status(&pool, None, uni_b, ProjectStatus::Open.id()).await;

    let response = get_auth(app.clone(), "/api/v1/projects", &token_for(&stu_user)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let projects = body["data"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"].as_i64(), Some(own_id));

    // Even an explicit filter for the other university stays scoped.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/projects?university_id={uni_b}"),
        &token_for(&stu_user),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"].as_i64(), Some(own_id));

    // A student with no university selected sees nothing.
    let unaffiliated = create_user(&pool, "drifter", "student").await;
    StudentRepo::create_skeleton(&pool, unaffiliated.id)
        .await
        .unwrap();
    let response = get_auth(app, "/api/v1/projects", &token_for(&unaffiliated)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn running_projects_are_hidden_from_non_participants(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    let (_, company_id) = create_company(&pool, "acme", true).await;
    let (rival_user, _) = create_company(&pool, "rival", true).await;
    let (bystander, _) = create_student(&pool, "bystander", uni_id, true).await;
    let (applicant, applicant_id) = create_student(&pool, "applicant", uni_id, true).await;
    let (worker, worker_id) = create_student(&pool, "worker", uni_id, true).await;
    let project_id = create_project_with_status(
        &pool,
        Some(company_id),
        uni_id,
        ProjectStatus::InProgress.id(),
    )
    .await;

    sqlx::query(
        "INSERT INTO project_applications (project_id, student_id, cover_letter) \
         VALUES ($1, $2, 'Applied while it was open')",
    )
    .bind(project_id)
    .bind(applicant_id)
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO project_assignments (project_id, student_id) VALUES ($1, $2)")
        .bind(project_id)
        .bind(worker_id)
        .execute(&pool)
        .await
        .unwrap();

    // Another company gets a 404, not a peek at the competition.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&rival_user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A student who never applied gets a 404 too.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&bystander),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Applicants and assigned students keep access.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&applicant),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["has_applied"], true);

    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&worker),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["is_assigned"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn hidden_projects_are_not_found_for_students(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    let (company_user, company_id) = create_company(&pool, "acme", true).await;
    let (stu_user, _) = create_student(&pool, "stu", uni_id, true).await;
    let project_id = create_project_with_status(
        &pool,
        Some(company_id),
        uni_id,
        ProjectStatus::PendingReview.id(),
    )
    .await;

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&stu_user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The poster still sees it.
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&company_user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn student_detail_includes_application_context(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni", false).await;
    let (_, company_id) = create_company(&pool, "acme", true).await;
    let (stu_user, _) = create_student(&pool, "stu", uni_id, true).await;
    let project_id =
        create_project_with_status(&pool, Some(company_id), uni_id, ProjectStatus::Open.id())
            .await;

    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&stu_user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["has_applied"], false);
    assert_eq!(body["data"]["is_assigned"], false);
    assert!(body["data"]["eligible"].is_boolean());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mine_is_role_shaped(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (uni_user, uni_id) = create_university(&pool, "uni", false).await;
    let (company_user, company_id) = create_company(&pool, "acme", true).await;
    let (stu_user, student_id) = create_student(&pool, "stu", uni_id, true).await;

    let posted_id =
        create_project_with_status(&pool, Some(company_id), uni_id, ProjectStatus::Open.id())
            .await;
    let pending_id = create_project_with_status(
        &pool,
        Some(company_id),
        uni_id,
        ProjectStatus::PendingReview.id(),
    )
    .await;
    sqlx::query("INSERT INTO project_assignments (project_id, student_id) VALUES ($1, $2)")
        .bind(posted_id)
        .bind(student_id)
        .execute(&pool)
        .await
        .unwrap();

    // Companies see everything they posted.
    let response = get_auth(app.clone(), "/api/v1/projects/mine", &token_for(&company_user)).await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // The university review queue is its pending_review slice.
    let response = get_auth(
        app.clone(),
        "/api/v1/projects/mine?status=pending_review",
        &token_for(&uni_user),
    )
    .await;
    let body = body_json(response).await;
    let queue = body["data"].as_array().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["id"].as_i64(), Some(pending_id));

    // Students see their assignments.
    let response = get_auth(app, "/api/v1/projects/mine", &token_for(&stu_user)).await;
    let body = body_json(response).await;
    let assigned = body["data"].as_array().unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0]["id"].as_i64(), Some(posted_id));
}
