//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Comma-joined tag columns (skills, eligibility lists) stay raw in the row
//! structs; `into_view()` converts them to ordered lists for API responses.

pub mod application;
pub mod company;
pub mod dashboard;
pub mod deliverable;
pub mod milestone;
pub mod project;
pub mod session;
pub mod student;
pub mod university;
pub mod user;
