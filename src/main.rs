use std::sync::Arc;

use color_eyre::eyre::{eyre, Result, WrapErr};
use reqwest::Client;
use sqlx::PgPool;
use tokio::sync::RwLock;

use team_portal::{
    app_state::AppState,
    domain::{ApiKeyPool, Email},
    get_postgres_pool, get_redis_client,
    services::{
        data_stores::{
            PostgresApplicationStore, PostgresGeneratedImageStore,
            PostgresMemberStore, PostgresProjectStore, RedisHealthCache,
        },
        openai_image_client::OpenAiImageClient,
        postmark_email_client::PostmarkEmailClient,
    },
    utils::{constants, constants::prod, tracing::init_tracing},
    Application,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let pg_pool = configure_postgres().await?;
    let redis_conn = Arc::new(RwLock::new(configure_redis()?));

    let member_store =
        Arc::new(RwLock::new(PostgresMemberStore::new(pg_pool.clone())));
    let application_store =
        Arc::new(RwLock::new(PostgresApplicationStore::new(pg_pool.clone())));
    let project_store =
        Arc::new(RwLock::new(PostgresProjectStore::new(pg_pool.clone())));
    let image_store =
        Arc::new(RwLock::new(PostgresGeneratedImageStore::new(pg_pool)));
    let health_cache = Arc::new(RwLock::new(RedisHealthCache::new(redis_conn)));

    let email_client = Arc::new(configure_postmark_email_client()?);
    let image_client = Arc::new(configure_image_client()?);

    let app_state = AppState::new(
        member_store,
        application_store,
        project_store,
        image_store,
        health_cache,
        email_client,
        image_client,
    );

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .map_err(|e| eyre!(e.to_string()))
        .wrap_err("Failed to build app")?;

    app.run().await.wrap_err("Failed to run app")
}

async fn configure_postgres() -> Result<PgPool> {
    let pg_pool = get_postgres_pool(&constants::DATABASE_URL)
        .await
        .wrap_err("Failed to create Postgres connection pool!")?;

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    Ok(pg_pool)
}

fn configure_redis() -> Result<redis::Connection> {
    get_redis_client(constants::REDIS_HOST_NAME.to_owned())
        .wrap_err("Failed to get Redis client")?
        .get_connection()
        .wrap_err("Failed to get Redis connection")
}

fn configure_postmark_email_client() -> Result<PostmarkEmailClient> {
    let http_client = Client::builder()
        .timeout(prod::email_client::TIMEOUT)
        .build()
        .wrap_err("Failed to build HTTP client")?;

    let sender = Email::parse(&constants::POSTMARK_EMAIL_SENDER_ADDRESS)
        .map_err(|e| eyre!(e))
        .wrap_err("POSTMARK_EMAIL_SENDER_ADDRESS is not a valid address")?;

    Ok(PostmarkEmailClient::new(
        prod::email_client::BASE_URL.to_owned(),
        sender,
        constants::POSTMARK_AUTH_TOKEN.clone(),
        http_client,
    ))
}

fn configure_image_client() -> Result<OpenAiImageClient> {
    let http_client = Client::builder()
        .timeout(prod::image_client::TIMEOUT)
        .build()
        .wrap_err("Failed to build HTTP client")?;

    let key_pool = ApiKeyPool::new(constants::OPENAI_API_KEYS.clone())
        .wrap_err("No OpenAI API keys configured")?;

    Ok(OpenAiImageClient::new(
        constants::OPENAI_BASE_URL.to_owned(),
        key_pool,
        http_client,
    ))
}
