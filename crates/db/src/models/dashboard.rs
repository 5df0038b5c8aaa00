//! Dashboard counter models. All values are derived reads; nothing here is
//! stored state.

use serde::Serialize;
use sqlx::FromRow;

/// Student dashboard counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentDashboard {
    /// Assigned projects currently in progress.
    pub active_projects: i64,
    pub completed_projects: i64,
    pub pending_applications: i64,
    pub total_earned: f64,
}

/// Company dashboard counters. `total_projects` is a live count, not a
/// stored counter.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompanyDashboard {
    pub total_projects: i64,
    pub pending_review: i64,
    pub open_projects: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
    pub rejected_projects: i64,
    pub rating: f64,
}

/// University dashboard counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UniversityDashboard {
    pub pending_projects: i64,
    pub active_projects: i64,
    pub total_students: i64,
    pub pending_students: i64,
    pub verified_companies: i64,
}

/// Project workspace progress summary.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectProgress {
    pub total_milestones: i64,
    pub approved_milestones: i64,
    pub progress_percentage: f64,
}
