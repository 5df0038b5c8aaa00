//! Data access repositories.
//!
//! Stateless structs with async methods taking `&PgPool`. Multi-row writes
//! that must be atomic (accept-application staffing, milestone
//! recomputation, project completion) run in explicit transactions.

mod application_repo;
mod company_repo;
mod dashboard_repo;
mod deliverable_repo;
mod milestone_repo;
mod project_repo;
mod session_repo;
mod student_repo;
mod university_repo;
mod user_repo;

pub use application_repo::ApplicationRepo;
pub use company_repo::CompanyRepo;
pub use dashboard_repo::DashboardRepo;
pub use deliverable_repo::DeliverableRepo;
pub use milestone_repo::MilestoneRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use student_repo::StudentRepo;
pub use university_repo::UniversityRepo;
pub use user_repo::UserRepo;
