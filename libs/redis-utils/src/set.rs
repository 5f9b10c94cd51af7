//! Redis set accessor
//!
//! Only `add` and `remove` refresh the TTL. Whether they do is chosen at
//! construction; there is no default.

use crate::handle::{Expiry, KeyHandle};
use crate::SharedConnectionManager;
use redis::{AsyncCommands, RedisResult, ToRedisArgs};

#[derive(Clone)]
pub struct RedisSet {
    handle: KeyHandle,
}

impl RedisSet {
    pub fn new(
        redis: SharedConnectionManager,
        key: impl Into<String>,
        ttl_seconds: i64,
        auto_refresh: bool,
    ) -> Self {
        Self {
            handle: KeyHandle::new(redis, key.into(), Expiry::new(ttl_seconds, auto_refresh)),
        }
    }

    pub fn key(&self) -> &str {
        self.handle.key()
    }

    pub fn expiry(&self) -> Expiry {
        self.handle.expiry()
    }

    pub fn with_auto_refresh(&self, auto_refresh: bool) -> Self {
        Self {
            handle: self.handle.with_auto_refresh(auto_refresh),
        }
    }

    /// Set the TTL explicitly; negative `seconds` persists the key.
    pub async fn expire_seconds(&self, seconds: i64) -> RedisResult<()> {
        self.handle.expire_seconds(seconds).await
    }

    /// Add one value or every element of a slice. Returns how many were new.
    pub async fn add<V>(&self, values: V) -> RedisResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.handle.conn().await;
        let result = conn.sadd(self.handle.key(), values).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Remove one value or every element of a slice. Returns how many were removed.
    pub async fn remove<V>(&self, values: V) -> RedisResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.handle.conn().await;
        let result = conn.srem(self.handle.key(), values).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    pub async fn contains<V>(&self, value: V) -> RedisResult<bool>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.handle.conn().await;
        conn.sismember(self.handle.key(), value).await
    }

    /// Cardinality (SCARD).
    pub async fn count(&self) -> RedisResult<i64> {
        let mut conn = self.handle.conn().await;
        conn.scard(self.handle.key()).await
    }

    pub async fn members(&self) -> RedisResult<Vec<String>> {
        let mut conn = self.handle.conn().await;
        conn.smembers(self.handle.key()).await
    }

    /// Delete the whole set.
    pub async fn clear(&self) -> RedisResult<()> {
        let mut conn = self.handle.conn().await;
        conn.del(self.handle.key()).await
    }
}
