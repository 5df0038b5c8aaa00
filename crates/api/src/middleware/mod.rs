//! Request extractors: JWT authentication and role/profile resolution.

pub mod auth;
pub mod identity;
