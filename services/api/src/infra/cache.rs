use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::repository::RecipeCache;
use crate::domain::types::RecipeDetail;

fn recipe_key(recipe_id: Uuid) -> String {
    format!("recipe:{recipe_id}")
}

/// JSON-over-Redis cache. `pool: None` disables it: reads miss, writes no-op.
///
/// Redis failures are logged at `warn` and never reach the caller.
#[derive(Clone)]
pub struct RedisCache {
    pub pool: Option<Pool>,
    pub ttl_secs: u64,
}

impl RedisCache {
    pub fn disabled() -> Self {
        Self {
            pool: None,
            ttl_secs: 0,
        }
    }

    async fn connection(&self) -> Option<deadpool_redis::Connection> {
        let pool = self.pool.as_ref()?;
        match pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                tracing::warn!(error = %e, "redis pool unavailable, bypassing cache");
                None
            }
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = match conn.get(key).await {
            Ok(raw) => raw,
            Err(e) => {
                let e: deadpool_redis::redis::RedisError = e;
                tracing::warn!(error = %e, key, "cache get failed");
                return None;
            }
        };
        let raw = raw?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, key, "discarding undecodable cache entry");
                self.del(key).await;
                None
            }
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        let Some(mut conn) = self.connection().await else {
            return;
        };
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, key, "cache value not serializable");
                return;
            }
        };
        let result: Result<(), deadpool_redis::redis::RedisError> =
            conn.set_ex(key, payload, self.ttl_secs).await;
        if let Err(e) = result {
            tracing::warn!(error = %e, key, "cache set failed");
        }
    }

    pub async fn del(&self, key: &str) {
        let Some(mut conn) = self.connection().await else {
            return;
        };
        let result: Result<(), deadpool_redis::redis::RedisError> = conn.del(key).await;
        if let Err(e) = result {
            tracing::warn!(error = %e, key, "cache delete failed");
        }
    }
}

impl RecipeCache for RedisCache {
    async fn get_detail(&self, recipe_id: Uuid) -> Option<RecipeDetail> {
        self.get_json(&recipe_key(recipe_id)).await
    }

    async fn put_detail(&self, detail: &RecipeDetail) {
        self.set_json(&recipe_key(detail.recipe.id), detail).await;
    }

    async fn evict(&self, recipe_id: Uuid) {
        self.del(&recipe_key(recipe_id)).await;
    }
}
