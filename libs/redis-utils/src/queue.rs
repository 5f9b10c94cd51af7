//! FIFO queue on top of a Redis list, optionally bounded.
//!
//! Push appends at the tail, pop takes from the head. With `max_size > 0` the
//! list is trimmed after each push so only the newest `max_size` elements
//! remain.

use crate::handle::{Expiry, KeyHandle};
use crate::list::pop_front_many;
use crate::SharedConnectionManager;
use redis::{AsyncCommands, RedisResult, ToRedisArgs};
use tracing::debug;

/// Bounded queue bound to a single key.
#[derive(Clone)]
pub struct RedisQueue {
    handle: KeyHandle,
    max_size: u64,
}

impl RedisQueue {
    /// Unbounded queue with auto refresh enabled.
    pub fn new(redis: SharedConnectionManager, key: impl Into<String>, ttl_seconds: i64) -> Self {
        Self::with_max_size(redis, key, ttl_seconds, 0)
    }

    /// Queue keeping at most `max_size` elements; `0` means unbounded.
    pub fn with_max_size(
        redis: SharedConnectionManager,
        key: impl Into<String>,
        ttl_seconds: i64,
        max_size: u64,
    ) -> Self {
        Self {
            handle: KeyHandle::new(redis, key.into(), Expiry::new(ttl_seconds, true)),
            max_size,
        }
    }

    pub fn key(&self) -> &str {
        self.handle.key()
    }

    pub fn expiry(&self) -> Expiry {
        self.handle.expiry()
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn with_auto_refresh(&self, auto_refresh: bool) -> Self {
        Self {
            handle: self.handle.with_auto_refresh(auto_refresh),
            max_size: self.max_size,
        }
    }

    /// Set the TTL explicitly; negative `seconds` persists the key.
    pub async fn expire_seconds(&self, seconds: i64) -> RedisResult<()> {
        self.handle.expire_seconds(seconds).await
    }

    pub async fn count(&self) -> RedisResult<i64> {
        let mut conn = self.handle.conn().await;
        let result = conn.llen(self.handle.key()).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Append one value, or every element of a slice, then trim to `max_size`.
    ///
    /// Returns the queue length reported by RPUSH, before trimming.
    pub async fn push<V>(&self, values: V) -> RedisResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.handle.conn().await;
        let result: RedisResult<i64> = conn.rpush(self.handle.key(), values).await;
        self.handle.refresh_after(&mut conn, &result).await;
        let len = result?;

        if let Some((start, stop)) = trim_bounds(len, self.max_size) {
            conn.ltrim::<_, ()>(self.handle.key(), start, stop).await?;
            debug!(
                key = %self.handle.key(),
                len,
                max_size = self.max_size,
                "Queue trimmed"
            );
        }

        Ok(len)
    }

    /// Remove and return the oldest element.
    pub async fn pop(&self) -> RedisResult<Option<String>> {
        let mut conn = self.handle.conn().await;
        let result = conn.lpop(self.handle.key(), None).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Remove and return up to `count` of the oldest elements.
    pub async fn pop_count(&self, count: usize) -> RedisResult<Vec<String>> {
        pop_front_many(&self.handle, count).await
    }
}

/// LTRIM range keeping the newest `max_size` elements of a list of `len`.
///
/// `None` when the queue is unbounded or still within its limit.
fn trim_bounds(len: i64, max_size: u64) -> Option<(isize, isize)> {
    if max_size == 0 || len <= 0 || (len as u64) <= max_size {
        return None;
    }
    Some((-(max_size as isize), -1))
}
