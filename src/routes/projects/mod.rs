mod get_projects;
mod marketing_image;
mod new_project;

pub use get_projects::*;
pub use marketing_image::*;
pub use new_project::*;
