use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::AppState;

const HEALTH_KEY: &str = "health_check";
const HEALTH_VALUE: &str = "ok";
const HEALTH_TTL_SECONDS: u64 = 30;

/// Round-trips a short-lived value through the cache. Anything but an
/// exact read-back means the cache is down.
#[tracing::instrument(name = "Health check route handler", skip_all)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut cache = state.health_cache.write().await;

    let round_trip = match cache
        .set(HEALTH_KEY, HEALTH_VALUE, HEALTH_TTL_SECONDS)
        .await
    {
        Ok(()) => cache.get(HEALTH_KEY).await,
        Err(e) => Err(e),
    };

    match round_trip {
        Ok(Some(value)) if value == HEALTH_VALUE => {
            (StatusCode::OK, "OK").into_response()
        }
        Ok(_) => {
            tracing::error!("health check read back an unexpected value");
            (StatusCode::INTERNAL_SERVER_ERROR, "Cache is not healthy")
                .into_response()
        }
        Err(e) => {
            tracing::error!("health check cache round trip failed: {e:?}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Cache is not healthy")
                .into_response()
        }
    }
}
