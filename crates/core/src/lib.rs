//! Domain rules for the internship marketplace workflow core.
//!
//! This crate is pure logic: verification decisions, project lifecycle
//! transitions, application actions, milestone aggregation, and the shared
//! error taxonomy. It performs no I/O; the `internhub-db` and `internhub-api`
//! crates call into it.

pub mod application;
pub mod eligibility;
pub mod error;
pub mod lifecycle;
pub mod milestone;
pub mod roles;
pub mod status;
pub mod tags;
pub mod types;
pub mod verification;
