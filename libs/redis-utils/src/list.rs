//! Redis list accessor
//!
//! Every operation, reads included, re-arms the key TTL after it succeeds
//! when auto refresh is enabled.

use crate::handle::{Expiry, KeyHandle};
use crate::SharedConnectionManager;
use redis::{AsyncCommands, RedisResult, ToRedisArgs};
use std::num::NonZeroUsize;

/// List bound to a single key.
#[derive(Clone)]
pub struct RedisList {
    handle: KeyHandle,
}

impl RedisList {
    /// Create a list accessor with auto refresh enabled.
    ///
    /// `ttl_seconds <= 0` disables expiration.
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

    /// Copy of this accessor with a different refresh flag.
    pub fn with_auto_refresh(&self, auto_refresh: bool) -> Self {
        Self {
            handle: self.handle.with_auto_refresh(auto_refresh),
        }
    }

    /// Set the TTL explicitly; negative `seconds` persists the key.
    pub async fn expire_seconds(&self, seconds: i64) -> RedisResult<()> {
        self.handle.expire_seconds(seconds).await
    }

    /// Number of elements (LLEN).
    pub async fn count(&self) -> RedisResult<i64> {
        let mut conn = self.handle.conn().await;
        let result = conn.llen(self.handle.key()).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Append one value, or every element of a slice, at the tail. Returns the new length.
    pub async fn rpush<V>(&self, values: V) -> RedisResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.handle.conn().await;
        let result = conn.rpush(self.handle.key(), values).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Insert one value, or every element of a slice, at the head. Returns the new length.
    pub async fn lpush<V>(&self, values: V) -> RedisResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.handle.conn().await;
        let result = conn.lpush(self.handle.key(), values).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Remove and return the last element.
    pub async fn rpop(&self) -> RedisResult<Option<String>> {
        let mut conn = self.handle.conn().await;
        let result = conn.rpop(self.handle.key(), None).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Remove and return the first element.
    pub async fn lpop(&self) -> RedisResult<Option<String>> {
        let mut conn = self.handle.conn().await;
        let result = conn.lpop(self.handle.key(), None).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Remove and return up to `count` elements from the head.
    pub async fn lpop_count(&self, count: usize) -> RedisResult<Vec<String>> {
        pop_front_many(&self.handle, count).await
    }

    /// Element at `index` (LINDEX); negative indexes count from the tail.
    pub async fn get(&self, index: isize) -> RedisResult<Option<String>> {
        let mut conn = self.handle.conn().await;
        let result = conn.lindex(self.handle.key(), index).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Overwrite the element at `index` (LSET).
    pub async fn set<V>(&self, index: isize, value: V) -> RedisResult<()>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.handle.conn().await;
        let result = conn.lset(self.handle.key(), index, value).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Remove every element equal to `value`. Returns the number removed.
    pub async fn remove<V>(&self, value: V) -> RedisResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        self.lrem(0, value).await
    }

    /// Remove up to `count` elements equal to `value`, scanning from the head.
    ///
    /// A zero `count` removes nothing and sends no command.
    pub async fn remove_from_head<V>(&self, value: V, count: usize) -> RedisResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        if count == 0 {
            return Ok(0);
        }
        self.lrem(count as isize, value).await
    }

    /// Remove up to `count` elements equal to `value`, scanning from the tail.
    ///
    /// A zero `count` removes nothing and sends no command.
    pub async fn remove_from_tail<V>(&self, value: V, count: usize) -> RedisResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        if count == 0 {
            return Ok(0);
        }
        self.lrem(-(count as isize), value).await
    }

    /// Elements between `start` and `end`, both inclusive (LRANGE).
    pub async fn range(&self, start: isize, end: isize) -> RedisResult<Vec<String>> {
        let mut conn = self.handle.conn().await;
        let result = conn.lrange(self.handle.key(), start, end).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    async fn lrem<V>(&self, count: isize, value: V) -> RedisResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.handle.conn().await;
        let result = conn.lrem(self.handle.key(), count, value).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }
}

/// LPOP with a count. Zero pops nothing and skips the round-trip.
pub(crate) async fn pop_front_many(handle: &KeyHandle, count: usize) -> RedisResult<Vec<String>> {
    let Some(count) = NonZeroUsize::new(count) else {
        return Ok(Vec::new());
    };

    let mut conn = handle.conn().await;
    let result: RedisResult<Option<Vec<String>>> = conn.lpop(handle.key(), Some(count)).await;
    let result = result.map(Option::unwrap_or_default);
    handle.refresh_after(&mut conn, &result).await;
    result
}
