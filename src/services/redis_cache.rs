// src/services/redis_cache.rs
use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use tokio::sync::OnceCell;

use super::chart_cache::{CacheError, ChartCache};

/// Chart cache backed by Redis `GET` / `SETEX`.
///
/// Connects on first use. A failed connect surfaces as a [`CacheError`] on
/// that request and is retried by the next one.
pub struct RedisChartCache {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisChartCache {
    pub fn new(host: &str, port: u16) -> Result<Self, CacheError> {
        let client = redis::Client::open(format!("redis://{host}:{port}/"))?;
        Ok(Self { client, conn: OnceCell::new() })
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let conn = self.client.get_connection_manager().await?;
                tracing::info!("connected to redis");
                Ok::<_, CacheError>(conn)
            })
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl ChartCache for RedisChartCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await?;
        Ok(())
    }
}
