mod apply;
mod get_applications;

pub use apply::*;
pub use get_applications::*;
