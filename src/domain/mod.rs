mod api_key_pool;
mod application;
mod category;
mod data_stores;
mod email;
mod email_client;
mod error;
mod image_client;
mod marketing;
mod member;
mod member_name;
mod phone_number;
mod project;
mod project_name;

pub use api_key_pool::*;
pub use application::*;
pub use category::*;
pub use data_stores::*;
pub use email::*;
pub use email_client::*;
pub use error::*;
pub use image_client::*;
pub use marketing::*;
pub use member::*;
pub use member_name::*;
pub use phone_number::*;
pub use project::*;
pub use project_name::*;
