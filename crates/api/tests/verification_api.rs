//! HTTP-level tests for university verification of students and companies.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, create_company, create_student, create_university, create_user,
    get_auth, post_json_auth, token_for,
};
use internhub_db::repositories::StudentRepo;

#[sqlx::test(migrations = "../db/migrations")]
async fn university_lists_only_its_own_students(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (uni_user, uni_id) = create_university(&pool, "uni_a", false).await;
    let (_, other_uni_id) = create_university(&pool, "uni_b", false).await;
    create_student(&pool, "stu_a", uni_id, false).await;
    create_student(&pool, "stu_b", other_uni_id, false).await;

    let token = token_for(&uni_user);
    let response = get_auth(app, "/api/v1/verification/students", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let students = body["data"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["university_id"].as_i64(), Some(uni_id));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn student_queue_filters_by_status(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (uni_user, uni_id) = create_university(&pool, "uni_a", false).await;
    create_student(&pool, "stu_pending", uni_id, false).await;
    create_student(&pool, "stu_verified", uni_id, true).await;

    let token = token_for(&uni_user);
    let response = get_auth(
        app.clone(),
        "/api/v1/verification/students?status=pending",
        &token,
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = get_auth(app, "/api/v1/verification/students?status=bogus", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approve_student_sets_verified(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (uni_user, uni_id) = create_university(&pool, "uni_a", false).await;
    let (_, student_id) = create_student(&pool, "stu", uni_id, false).await;

    let token = token_for(&uni_user);
    let response = post_json_auth(
        app,
        &format!("/api/v1/verification/students/{student_id}"),
        &token,
        json!({ "decision": "approve" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["is_verified"], true);

    let student = StudentRepo::find_by_id(&pool, student_id)
        .await
        .unwrap()
        .unwrap();
    assert!(student.is_verified);
    assert_eq!(student.verified_by, Some(uni_id));
    assert!(student.verified_at.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reject_student_records_reason(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (uni_user, uni_id) = create_university(&pool, "uni_a", false).await;
    let (_, student_id) = create_student(&pool, "stu", uni_id, false).await;

    let token = token_for(&uni_user);
    let response = post_json_auth(
        app,
        &format!("/api/v1/verification/students/{student_id}"),
        &token,
        json!({ "decision": "reject", "reason": "Student number not found" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let student = StudentRepo::find_by_id(&pool, student_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!student.is_verified);
    assert_eq!(student.rejection_reason, "Student number not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approve_requires_complete_academic_block(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (uni_user, uni_id) = create_university(&pool, "uni_a", false).await;

    // A bare skeleton profile bound to the university but without a
    // student number or university email.
    let stu_user = create_user(&pool, "stu", "student").await;
    let student = StudentRepo::create_skeleton(&pool, stu_user.id).await.unwrap();
    sqlx::query("UPDATE students SET university_id = $2 WHERE id = $1")
        .bind(student.id)
        .bind(uni_id)
        .execute(&pool)
        .await
        .unwrap();

    let token = token_for(&uni_user);
    let response = post_json_auth(
        app,
        &format!("/api/v1/verification/students/{}", student.id),
        &token,
        json!({ "decision": "approve" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_the_students_university_may_decide(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni_a", false).await;
    let (other_user, _) = create_university(&pool, "uni_b", false).await;
    let (_, student_id) = create_student(&pool, "stu", uni_id, false).await;

    let token = token_for(&other_user);
    let response = post_json_auth(
        app,
        &format!("/api/v1/verification/students/{student_id}"),
        &token,
        json!({ "decision": "approve" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn company_queue_is_shared_and_any_university_decides(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (uni_a_user, _) = create_university(&pool, "uni_a", false).await;
    let (uni_b_user, _) = create_university(&pool, "uni_b", false).await;
    let (_, company_id) = create_company(&pool, "acme", false).await;

    // Both universities see the same pending company.
    for user in [&uni_a_user, &uni_b_user] {
        let response = get_auth(
            app.clone(),
            "/api/v1/verification/companies?status=pending",
            &token_for(user),
        )
        .await;
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/verification/companies/{company_id}"),
        &token_for(&uni_b_user),
        json!({ "decision": "approve" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["is_verified"], true);

    // Approved companies drop out of the pending queue.
    let response = get_auth(
        app,
        "/api/v1/verification/companies?status=pending",
        &token_for(&uni_a_user),
    )
    .await;
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn verification_endpoints_require_university_role(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, uni_id) = create_university(&pool, "uni_a", false).await;
    let (stu_user, _) = create_student(&pool, "stu", uni_id, true).await;

    let response = get_auth(
        app,
        "/api/v1/verification/students",
        &token_for(&stu_user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
