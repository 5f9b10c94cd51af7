//! Redis hash accessor

use crate::handle::{Expiry, KeyHandle};
use crate::SharedConnectionManager;
use redis::{AsyncCommands, RedisResult, ToRedisArgs};
use std::collections::HashMap;

/// Field/value map bound to a single key.
///
/// TTL is refreshed after every successful command when auto refresh is on.
#[derive(Clone)]
pub struct RedisHash {
    handle: KeyHandle,
}

impl RedisHash {
    /// Create a hash accessor with auto refresh enabled.
    pub fn new(redis: SharedConnectionManager, key: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            handle: KeyHandle::new(redis, key.into(), Expiry::new(ttl_seconds, true)),
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

    /// Set one field. Returns 1 when the field is new, 0 when overwritten.
    pub async fn set<V>(&self, field: &str, value: V) -> RedisResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.handle.conn().await;
        let result = conn.hset(self.handle.key(), field, value).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Set several fields in one command.
    pub async fn set_multiple<F, V>(&self, items: &[(F, V)]) -> RedisResult<()>
    where
        F: ToRedisArgs + Send + Sync,
        V: ToRedisArgs + Send + Sync,
    {
        if items.is_empty() {
            return Ok(());
        }

        let mut conn = self.handle.conn().await;
        let result = conn.hset_multiple(self.handle.key(), items).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Value of `field`, `None` when the field or key is missing.
    pub async fn get(&self, field: &str) -> RedisResult<Option<String>> {
        let mut conn = self.handle.conn().await;
        let result = conn.hget(self.handle.key(), field).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Delete `field`. Returns the number of fields removed.
    pub async fn delete(&self, field: &str) -> RedisResult<i64> {
        let mut conn = self.handle.conn().await;
        let result = conn.hdel(self.handle.key(), field).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    pub async fn exists(&self, field: &str) -> RedisResult<bool> {
        let mut conn = self.handle.conn().await;
        let result = conn.hexists(self.handle.key(), field).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Full field to value mapping (HGETALL).
    pub async fn get_all(&self) -> RedisResult<HashMap<String, String>> {
        let mut conn = self.handle.conn().await;
        let result = conn.hgetall(self.handle.key()).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    pub async fn fields(&self) -> RedisResult<Vec<String>> {
        let mut conn = self.handle.conn().await;
        let result = conn.hkeys(self.handle.key()).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    pub async fn values(&self) -> RedisResult<Vec<String>> {
        let mut conn = self.handle.conn().await;
        let result = conn.hvals(self.handle.key()).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Number of fields (HLEN).
    pub async fn count(&self) -> RedisResult<i64> {
        let mut conn = self.handle.conn().await;
        let result = conn.hlen(self.handle.key()).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Add `delta` to the integer stored at `field` (HINCRBY). Returns the new value.
    pub async fn incr(&self, field: &str, delta: i64) -> RedisResult<i64> {
        let mut conn = self.handle.conn().await;
        let result = redis::cmd("HINCRBY")
            .arg(self.handle.key())
            .arg(field)
            .arg(delta)
            .query_async(&mut *conn)
            .await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    pub async fn inc(&self, field: &str) -> RedisResult<i64> {
        self.incr(field, 1).await
    }

    pub async fn dec(&self, field: &str) -> RedisResult<i64> {
        self.incr(field, -1).await
    }
}
