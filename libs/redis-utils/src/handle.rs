//! Key binding and sliding-TTL state shared by every accessor.

use crate::SharedConnectionManager;
use redis::aio::ConnectionManager;
use redis::RedisResult;
use std::time::Duration;
use tokio::sync::MutexGuard;
use tracing::{debug, warn};

/// Expiration settings of an accessor.
///
/// `ttl_seconds <= 0` means the key never expires. When `auto_refresh` is set
/// every successful command re-arms the TTL to the full window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    ttl_seconds: i64,
    auto_refresh: bool,
}

impl Expiry {
    pub const fn new(ttl_seconds: i64, auto_refresh: bool) -> Self {
        Self {
            ttl_seconds,
            auto_refresh,
        }
    }

    /// No expiration and no refresh.
    pub const fn none() -> Self {
        Self::new(0, false)
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// TTL window, `None` when the key does not expire.
    pub fn duration(&self) -> Option<Duration> {
        if self.ttl_seconds <= 0 {
            None
        } else {
            Some(Duration::from_secs(self.ttl_seconds as u64))
        }
    }

    pub fn should_refresh(&self) -> bool {
        self.auto_refresh && self.ttl_seconds > 0
    }

    pub fn with_auto_refresh(self, auto_refresh: bool) -> Self {
        Self {
            auto_refresh,
            ..self
        }
    }
}

/// Connection, key and expiry of one accessor. Immutable once built.
#[derive(Clone)]
pub(crate) struct KeyHandle {
    redis: SharedConnectionManager,
    key: String,
    expiry: Expiry,
}

impl KeyHandle {
    pub(crate) fn new(redis: SharedConnectionManager, key: String, expiry: Expiry) -> Self {
        Self { redis, key, expiry }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn expiry(&self) -> Expiry {
        self.expiry
    }

    pub(crate) fn with_auto_refresh(&self, auto_refresh: bool) -> Self {
        Self {
            redis: self.redis.clone(),
            key: self.key.clone(),
            expiry: self.expiry.with_auto_refresh(auto_refresh),
        }
    }

    pub(crate) async fn conn(&self) -> MutexGuard<'_, ConnectionManager> {
        self.redis.lock().await
    }

    /// Re-arm the TTL when `result` is a success and refresh is enabled.
    pub(crate) async fn refresh_after<T>(
        &self,
        conn: &mut ConnectionManager,
        result: &RedisResult<T>,
    ) {
        if result.is_ok() {
            self.refresh(conn).await;
        }
    }

    /// Re-arm the TTL to the full window when refresh is enabled.
    ///
    /// Refresh is best-effort: a failing EXPIRE is logged and otherwise
    /// ignored, the command's own result stays authoritative.
    pub(crate) async fn refresh(&self, conn: &mut ConnectionManager) {
        if !self.expiry.should_refresh() {
            return;
        }

        match redis::cmd("EXPIRE")
            .arg(&self.key)
            .arg(self.expiry.ttl_seconds)
            .query_async::<_, ()>(conn)
            .await
        {
            Ok(()) => debug!(key = %self.key, ttl = self.expiry.ttl_seconds, "TTL refreshed"),
            Err(e) => warn!(key = %self.key, error = %e, "TTL refresh failed"),
        }
    }

    /// Explicitly set the TTL. Negative `seconds` removes the expiration.
    pub(crate) async fn expire_seconds(&self, seconds: i64) -> RedisResult<()> {
        let mut conn = self.conn().await;
        if seconds < 0 {
            redis::cmd("PERSIST")
                .arg(&self.key)
                .query_async::<_, ()>(&mut *conn)
                .await?;
            debug!(key = %self.key, "TTL removed");
        } else {
            redis::cmd("EXPIRE")
                .arg(&self.key)
                .arg(seconds)
                .query_async::<_, ()>(&mut *conn)
                .await?;
            debug!(key = %self.key, ttl = seconds, "TTL set");
        }
        Ok(())
    }
}
