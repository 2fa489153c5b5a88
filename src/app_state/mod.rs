use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{
    ApplicationStore, EmailClient, GeneratedImageStore, HealthCache,
    ImageGenClient, MemberStore, ProjectStore,
};

pub type MemberStoreType = Arc<RwLock<dyn MemberStore + Send + Sync>>;
pub type ApplicationStoreType = Arc<RwLock<dyn ApplicationStore + Send + Sync>>;
pub type ProjectStoreType = Arc<RwLock<dyn ProjectStore + Send + Sync>>;
pub type GeneratedImageStoreType =
    Arc<RwLock<dyn GeneratedImageStore + Send + Sync>>;
pub type HealthCacheType = Arc<RwLock<dyn HealthCache + Send + Sync>>;
pub type EmailClientType = Arc<dyn EmailClient + Send + Sync>;
pub type ImageGenClientType = Arc<dyn ImageGenClient + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub member_store: MemberStoreType,
    pub application_store: ApplicationStoreType,
    pub project_store: ProjectStoreType,
    pub image_store: GeneratedImageStoreType,
    pub health_cache: HealthCacheType,
    pub email_client: EmailClientType,
    pub image_client: ImageGenClientType,
}

impl AppState {
    pub fn new(
        member_store: MemberStoreType,
        application_store: ApplicationStoreType,
        project_store: ProjectStoreType,
        image_store: GeneratedImageStoreType,
        health_cache: HealthCacheType,
        email_client: EmailClientType,
        image_client: ImageGenClientType,
    ) -> Self {
        Self {
            member_store,
            application_store,
            project_store,
            image_store,
            health_cache,
            email_client,
            image_client,
        }
    }
}
