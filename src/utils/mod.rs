pub mod auth;
pub mod constants;
pub mod relations;
pub mod tracing;
