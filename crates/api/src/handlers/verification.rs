//! Handlers for university-run verification of students and companies.

use axum::extract::{Path, Query, State};
use axum::Json;
use internhub_core::error::CoreError;
use internhub_core::status::VerificationStatus;
use internhub_core::types::DbId;
use internhub_core::verification::{
    check_student_approvable, check_student_verifier, rejection_reason, validate_decision,
    StudentCompleteness, DECISION_APPROVE,
};
use internhub_db::models::company::Company;
use internhub_db::models::student::StudentView;
use internhub_db::repositories::{CompanyRepo, StudentRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::RequireUniversity;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query string for the verification queues.
#[derive(Debug, Deserialize)]
pub struct QueueQuery {
    /// Filter by verification status wire name (`pending`, `approved`,
    /// `rejected`).
    pub status: Option<String>,
}

/// Request body for verification decisions.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    /// One of `approve`, `reject`.
    pub decision: String,
    /// Reason recorded on rejection; a default is used when omitted.
    pub reason: Option<String>,
}

fn parse_status_filter(query: &QueueQuery) -> AppResult<Option<VerificationStatus>> {
    match query.status.as_deref() {
        None => Ok(None),
        Some(name) => VerificationStatus::from_name(name)
            .map(Some)
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Unknown verification status '{name}'"
                )))
            }),
    }
}

/// GET /api/v1/verification/students
///
/// The university's own students, optionally filtered by verification
/// status.
pub async fn list_students(
    State(state): State<AppState>,
    auth: RequireUniversity,
    Query(query): Query<QueueQuery>,
) -> AppResult<Json<DataResponse<Vec<StudentView>>>> {
    let status = parse_status_filter(&query)?;
    let students = StudentRepo::list_by_university(&state.pool, auth.university.id, status).await?;
    Ok(Json(DataResponse {
        data: students.into_iter().map(|s| s.into_view()).collect(),
    }))
}

/// GET /api/v1/verification/companies
///
/// The shared company verification queue. Companies are not bound to one
/// university, so every university sees the same list.
pub async fn list_companies(
    State(state): State<AppState>,
    _auth: RequireUniversity,
    Query(query): Query<QueueQuery>,
) -> AppResult<Json<DataResponse<Vec<Company>>>> {
    let status = parse_status_filter(&query)?;
    let companies = CompanyRepo::list_all(&state.pool, status).await?;
    Ok(Json(DataResponse { data: companies }))
}

/// POST /api/v1/verification/students/{id}
///
/// Approve or reject a student. Only the student's own university may
/// decide, and approval requires a complete academic block. Re-deciding an
/// already-verified student is allowed (a verification can be revoked by
/// rejecting it).
pub async fn decide_student(
    State(state): State<AppState>,
    auth: RequireUniversity,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<Json<DataResponse<StudentView>>> {
    validate_decision(&input.decision)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "student",
            id,
        }))?;

    check_student_verifier(student.university_id, auth.university.id).map_err(AppError::Core)?;

    let updated = if input.decision == DECISION_APPROVE {
        check_student_approvable(&StudentCompleteness {
            university_id: student.university_id,
            student_number: &student.student_number,
            university_email: &student.university_email,
        })
        .map_err(AppError::Core)?;
        StudentRepo::approve(&state.pool, id, auth.university.id).await?
    } else {
        let reason = rejection_reason(input.reason.as_deref());
        StudentRepo::reject(&state.pool, id, &reason).await?
    };

    let student = updated.ok_or(AppError::Core(CoreError::NotFound {
        entity: "student",
        id,
    }))?;
    Ok(Json(DataResponse {
        data: student.into_view(),
    }))
}

/// POST /api/v1/verification/companies/{id}
///
/// Approve or reject a company. Any university may decide.
pub async fn decide_company(
    State(state): State<AppState>,
    auth: RequireUniversity,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<Json<DataResponse<Company>>> {
    validate_decision(&input.decision)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let company = CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "company",
            id,
        }))?;

    let updated = if input.decision == DECISION_APPROVE {
        CompanyRepo::approve(&state.pool, company.id, auth.university.id).await?
    } else {
        let reason = rejection_reason(input.reason.as_deref());
        CompanyRepo::reject(&state.pool, company.id, &reason).await?
    };

    let company = updated.ok_or(AppError::Core(CoreError::NotFound {
        entity: "company",
        id,
    }))?;
    Ok(Json(DataResponse { data: company }))
}
