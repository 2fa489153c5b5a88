mod get_categories;
mod get_members;
mod new_category;
mod upload_images;

pub use get_categories::*;
pub use get_members::*;
pub use new_category::*;
pub use upload_images::*;
