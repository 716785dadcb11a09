//! Writer for the app meta cache (Redis).

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use crate::error::{MetaError, MetaResult};

/// Key-value store holding per-app metadata.
#[async_trait]
pub trait MetaCache: Send + Sync {
    /// Store `value` under `key` with no expiry, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> MetaResult<()>;
}

/// [`MetaCache`] backed by a Redis server.
///
/// Opening only validates the address; the connection is made on first write.
pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    pub fn open(addr: &str) -> MetaResult<Self> {
        let client = redis::Client::open(redis_url(addr))
            .map_err(|e| MetaError::Client(format!("redis {addr}: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MetaCache for RedisCache {
    async fn set(&self, key: &str, value: &str) -> MetaResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| MetaError::CacheWrite(format!("connect: {e}")))?;

        // Plain SET: no EX/PX, so the entry never expires.
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| MetaError::CacheWrite(format!("set {key}: {e}")))?;

        debug!(key, bytes = value.len(), "cache entry written");
        Ok(())
    }
}

/// Accept either a bare `host:port` or a full `redis://` URL.
fn redis_url(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("redis://{addr}")
    }
}
