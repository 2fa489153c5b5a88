pub mod applications;
pub mod health_check;
pub mod members;
pub mod projects;

pub use health_check::health_check;
