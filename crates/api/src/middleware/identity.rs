//! Role extractors that resolve the caller's profile row.
//!
//! Each extractor wraps [`AuthUser`], checks the token role, and loads the
//! matching profile so handlers get the profile id (the id every domain
//! table references) without repeating the lookup. A valid token whose
//! profile row is missing is treated as 403, not 500: it means the account
//! was created outside the registration flow.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use internhub_core::error::CoreError;
use internhub_core::roles::{ROLE_COMPANY, ROLE_STUDENT, ROLE_UNIVERSITY};
use internhub_db::models::company::Company;
use internhub_db::models::student::Student;
use internhub_db::models::university::University;
use internhub_db::repositories::{CompanyRepo, StudentRepo, UniversityRepo};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `student` role and resolves the student profile.
pub struct RequireStudent {
    pub user: AuthUser,
    pub student: Student,
}

impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_STUDENT {
            return Err(AppError::Core(CoreError::Forbidden(
                "Student role required".into(),
            )));
        }
        let student = StudentRepo::find_by_user_id(&state.pool, user.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("Student profile missing".into())))?;
        Ok(RequireStudent { user, student })
    }
}

/// Requires the `company` role and resolves the company profile.
pub struct RequireCompany {
    pub user: AuthUser,
    pub company: Company,
}

impl FromRequestParts<AppState> for RequireCompany {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_COMPANY {
            return Err(AppError::Core(CoreError::Forbidden(
                "Company role required".into(),
            )));
        }
        let company = CompanyRepo::find_by_user_id(&state.pool, user.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("Company profile missing".into())))?;
        Ok(RequireCompany { user, company })
    }
}

/// Requires the `university` role and resolves the university profile.
pub struct RequireUniversity {
    pub user: AuthUser,
    pub university: University,
}

impl FromRequestParts<AppState> for RequireUniversity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_UNIVERSITY {
            return Err(AppError::Core(CoreError::Forbidden(
                "University role required".into(),
            )));
        }
        let university = UniversityRepo::find_by_user_id(&state.pool, user.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden("University profile missing".into()))
            })?;
        Ok(RequireUniversity { user, university })
    }
}
