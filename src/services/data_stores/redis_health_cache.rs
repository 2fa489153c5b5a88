use color_eyre::eyre::{Result, WrapErr};
use redis::{Commands, Connection};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::HealthCache;

pub struct RedisHealthCache {
    conn: Arc<RwLock<Connection>>,
}

impl RedisHealthCache {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

// We are using a key prefix to prevent collisions and organize data!
const HEALTH_KEY_PREFIX: &str = "health:";

fn get_key(key: &str) -> String {
    format!("{HEALTH_KEY_PREFIX}{key}")
}

#[async_trait::async_trait]
impl HealthCache for RedisHealthCache {
    #[tracing::instrument(name = "Setting health key in Redis", skip_all)]
    async fn set(
        &mut self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<()> {
        self.conn
            .write()
            .await
            .set_ex::<_, _, ()>(get_key(key), value, ttl_seconds)
            .wrap_err("failed to set health key in Redis")?;

        Ok(())
    }

    #[tracing::instrument(name = "Getting health key from Redis", skip_all)]
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.conn
            .write()
            .await
            .get(get_key(key))
            .wrap_err("failed to get health key from Redis")
    }
}
