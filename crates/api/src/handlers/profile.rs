//! Handlers for role profiles (`/profile/...`) and the public university
//! directory.

use axum::extract::State;
use axum::Json;
use internhub_core::error::CoreError;
use internhub_db::models::company::{Company, UpdateCompanyProfile};
use internhub_db::models::student::{StudentView, UpdateStudentProfile};
use internhub_db::models::university::{University, UpdateUniversityProfile};
use internhub_db::repositories::{CompanyRepo, StudentRepo, UniversityRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::{RequireCompany, RequireStudent, RequireUniversity};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile/student
pub async fn get_student_profile(
    auth: RequireStudent,
) -> AppResult<Json<DataResponse<StudentView>>> {
    Ok(Json(DataResponse {
        data: auth.student.into_view(),
    }))
}

/// PUT /api/v1/profile/student
///
/// Update the student's own profile. An unverified student re-enters the
/// pending verification queue.
pub async fn update_student_profile(
    State(state): State<AppState>,
    auth: RequireStudent,
    Json(input): Json<UpdateStudentProfile>,
) -> AppResult<Json<DataResponse<StudentView>>> {
    input.validate()?;
    let student = StudentRepo::update_profile(&state.pool, auth.student.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "student",
            id: auth.student.id,
        }))?;
    Ok(Json(DataResponse {
        data: student.into_view(),
    }))
}

/// GET /api/v1/profile/company
pub async fn get_company_profile(
    auth: RequireCompany,
) -> AppResult<Json<DataResponse<Company>>> {
    Ok(Json(DataResponse { data: auth.company }))
}

/// PUT /api/v1/profile/company
pub async fn update_company_profile(
    State(state): State<AppState>,
    auth: RequireCompany,
    Json(input): Json<UpdateCompanyProfile>,
) -> AppResult<Json<DataResponse<Company>>> {
    input.validate()?;
    let company = CompanyRepo::update_profile(&state.pool, auth.company.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "company",
            id: auth.company.id,
        }))?;
    Ok(Json(DataResponse { data: company }))
}

/// GET /api/v1/profile/university
pub async fn get_university_profile(
    auth: RequireUniversity,
) -> AppResult<Json<DataResponse<University>>> {
    Ok(Json(DataResponse {
        data: auth.university,
    }))
}

/// PUT /api/v1/profile/university
pub async fn update_university_profile(
    State(state): State<AppState>,
    auth: RequireUniversity,
    Json(input): Json<UpdateUniversityProfile>,
) -> AppResult<Json<DataResponse<University>>> {
    input.validate()?;
    let university = UniversityRepo::update_profile(&state.pool, auth.university.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "university",
            id: auth.university.id,
        }))?;
    Ok(Json(DataResponse { data: university }))
}

/// GET /api/v1/universities
///
/// Public directory used by registration and posting forms.
pub async fn list_universities(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<University>>>> {
    let universities = UniversityRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse {
        data: universities,
    }))
}
