use std::collections::HashMap;

use color_eyre::eyre::Result;

use crate::domain::HealthCache;

/// In-memory health cache. TTLs are ignored; entries live for the life
/// of the process, which is enough for the liveness round trip.
#[derive(Default)]
pub struct HashmapHealthCache {
    entries: HashMap<String, String>,
}

#[async_trait::async_trait]
impl HealthCache for HashmapHealthCache {
    async fn set(
        &mut self,
        key: &str,
        value: &str,
        _ttl_seconds: u64,
    ) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}

#[tokio::test]
async fn test_round_trip() {
    let mut cache = HashmapHealthCache::default();
    cache.set("health_check", "ok", 30).await.unwrap();
    assert_eq!(
        cache.get("health_check").await.unwrap().as_deref(),
        Some("ok")
    );
    assert_eq!(cache.get("missing").await.unwrap(), None);
}
