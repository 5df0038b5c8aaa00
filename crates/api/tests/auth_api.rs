//! HTTP-level tests for the `/auth` endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, create_user, get_auth, post_json, post_json_auth, TEST_PASSWORD,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn register_creates_account_and_profile(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "a_long_password_1",
            "role": "student",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert!(body["access_token"].as_str().unwrap().len() > 20);
    assert!(!body["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["role"], "student");

    // The empty student profile row exists immediately after registration.
    let user_id = body["user"]["id"].as_i64().unwrap();
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM students WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_unknown_role(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "a_long_password_1",
            "role": "admin",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "short",
            "role": "student",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_username_conflicts(pool: PgPool) {
    let app = build_test_app(pool.clone());
    create_user(&pool, "carol", "student").await;

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "username": "carol",
            "email": "other@example.com",
            "password": "a_long_password_1",
            "role": "student",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_registration_leaves_no_partial_account(pool: PgPool) {
    let app = build_test_app(pool.clone());
    create_user(&pool, "carol", "student").await;

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "username": "carol",
            "email": "other@example.com",
            "password": "a_long_password_1",
            "role": "student",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The account and profile inserts share a transaction, so the failed
    // attempt wrote nothing.
    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 1);
    let (students,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(students, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_succeeds_with_correct_password(pool: PgPool) {
    let app = build_test_app(pool.clone());
    create_user(&pool, "dave", "company").await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "dave", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "company");
    assert_eq!(body["expires_in"], 15 * 60);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_rejects_wrong_password(pool: PgPool) {
    let app = build_test_app(pool.clone());
    create_user(&pool, "erin", "student").await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "erin", "password": "not_the_password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_session(pool: PgPool) {
    let app = build_test_app(pool.clone());
    create_user(&pool, "frank", "student").await;

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "frank", "password": TEST_PASSWORD }),
    )
    .await;
    let body = body_json(login).await;
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"].as_str(), Some(refresh_token.as_str()));

    // The old token was revoked by the rotation.
    let replay = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_the_presented_session(pool: PgPool) {
    let app = build_test_app(pool.clone());
    create_user(&pool, "grace", "student").await;

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "grace", "password": TEST_PASSWORD }),
    )
    .await;
    let body = body_json(login).await;
    let access_token = body["access_token"].as_str().unwrap().to_string();
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    let response = post_json_auth(
        app.clone(),
        "/api/v1/auth/logout",
        &access_token,
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let replay = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_the_authenticated_account(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let user = create_user(&pool, "heidi", "university").await;
    let token = common::token_for(&user);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "heidi");
    assert_eq!(body["role"], "university");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_rejects_missing_and_garbage_tokens(pool: PgPool) {
    let app = build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
