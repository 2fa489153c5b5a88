mod hashmap_application_store;
mod hashmap_health_cache;
mod hashmap_image_store;
mod hashmap_member_store;
mod hashmap_project_store;
mod postgres_application_store;
mod postgres_image_store;
mod postgres_member_store;
mod postgres_project_store;
mod redis_health_cache;

pub use hashmap_application_store::*;
pub use hashmap_health_cache::*;
pub use hashmap_image_store::*;
pub use hashmap_member_store::*;
pub use hashmap_project_store::*;
pub use postgres_application_store::*;
pub use postgres_image_store::*;
pub use postgres_member_store::*;
pub use postgres_project_store::*;
pub use redis_health_cache::*;
