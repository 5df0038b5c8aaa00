//! HTTP handlers, grouped by resource.

pub mod application;
pub mod auth;
pub mod dashboard;
pub mod deliverable;
pub mod milestone;
pub mod profile;
pub mod project;
pub mod verification;
