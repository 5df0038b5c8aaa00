//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router with the production middleware stack
//! and provides one-shot request helpers.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use internhub_api::auth::jwt::JwtConfig;
use internhub_api::config::ServerConfig;
use internhub_api::routes;
use internhub_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// One-shot request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON POST request without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON POST request with a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON PUT request with a Bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a DELETE request with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Database fixtures
// ---------------------------------------------------------------------------

use internhub_api::auth::jwt::generate_access_token;
use internhub_api::auth::password::hash_password;
use internhub_core::types::DbId;
use internhub_db::models::user::{CreateUser, User};
use internhub_db::repositories::{CompanyRepo, StudentRepo, UniversityRepo, UserRepo};

/// Password used by all fixture accounts.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Issue an access token for a user, signed with the test config secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create a user account with the given role directly in the database.
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hashed,
            role: role.to_string(),
            phone: None,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Create a university account and profile. Returns `(user, university_id)`.
pub async fn create_university(pool: &PgPool, username: &str, auto_approve: bool) -> (User, DbId) {
    let user = create_user(pool, username, "university").await;
    let university = UniversityRepo::create_skeleton(pool, user.id)
        .await
        .expect("university creation should succeed");
    sqlx::query("UPDATE universities SET name = $2, auto_approve_projects = $3 WHERE id = $1")
        .bind(university.id)
        .bind(format!("{username} University"))
        .bind(auto_approve)
        .execute(pool)
        .await
        .expect("university setup should succeed");
    (user, university.id)
}

/// Create a company account and profile. Returns `(user, company_id)`.
pub async fn create_company(pool: &PgPool, username: &str, verified: bool) -> (User, DbId) {
    let user = create_user(pool, username, "company").await;
    let company = CompanyRepo::create_skeleton(pool, user.id)
        .await
        .expect("company creation should succeed");
    if verified {
        sqlx::query(
            "UPDATE companies SET is_verified = TRUE, verification_status_id = 2 WHERE id = $1",
        )
        .bind(company.id)
        .execute(pool)
        .await
        .expect("company verification setup should succeed");
    }
    (user, company.id)
}

/// Create a student account and profile bound to a university, with the
/// academic block filled in. Returns `(user, student_id)`.
pub async fn create_student(
    pool: &PgPool,
    username: &str,
    university_id: DbId,
    verified: bool,
) -> (User, DbId) {
    let user = create_user(pool, username, "student").await;
    let student = StudentRepo::create_skeleton(pool, user.id)
        .await
        .expect("student creation should succeed");
    sqlx::query(
        "UPDATE students SET
            university_id = $2,
            student_number = $3,
            university_email = $4,
            is_verified = $5,
            verification_status_id = CASE WHEN $5 THEN 2 ELSE 1 END
         WHERE id = $1",
    )
    .bind(student.id)
    .bind(university_id)
    .bind(format!("S-{username}"))
    .bind(format!("{username}@uni.edu"))
    .bind(verified)
    .execute(pool)
    .await
    .expect("student setup should succeed");
    (user, student.id)
}

/// Insert a project directly with the given status. Returns the project id.
pub async fn create_project_with_status(
    pool: &PgPool,
    company_id: Option<DbId>,
    university_id: DbId,
    status_id: i16,
) -> DbId {
    let posted_by_university = company_id.is_none();
    let poster_type = if posted_by_university {
        "university"
    } else {
        "company"
    };
    let row: (DbId,) = sqlx::query_as(
        "INSERT INTO projects (
            poster_type, company_id, university_id, posted_by_university,
            title, domain, description, required_skills, payment_amount,
            duration_weeks, deadline, status_id
         ) VALUES ($1, $2, $3, $4, 'Test project', 'web', 'A test project',
                   'rust,sql', 500, 4, CURRENT_DATE + 30, $5)
         RETURNING id",
    )
    .bind(poster_type)
    .bind(company_id)
    .bind(university_id)
    .bind(posted_by_university)
    .bind(status_id)
    .fetch_one(pool)
    .await
    .expect("project insert should succeed");
    row.0
}
