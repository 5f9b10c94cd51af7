//! Redis sorted-set accessor
//!
//! Provides:
//! - Typed score bounds (inclusive, exclusive, infinite)
//! - Ranked and score-filtered reads in both directions
//! - Batched "reset every score to zero" maintenance
//! - Intersection filter against another sorted set
//!
//! Mutations refresh the TTL when auto refresh is on; reads never do.

use crate::error::ZeroScoreError;
use crate::handle::{Expiry, KeyHandle};
use crate::SharedConnectionManager;
use redis::{AsyncCommands, Cmd, RedisResult, RedisWrite, ToRedisArgs};
use std::fmt;
use tracing::{debug, warn};

pub const MIN_SCORE: &str = "-inf";
pub const MAX_SCORE: &str = "+inf";

/// Maximum members per ZADD issued by [`RedisSortedSet::zero_scores`].
pub const ZERO_SCORE_BATCH_SIZE: usize = 500;

/// One end of a score range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreBound {
    Inclusive(f64),
    Exclusive(f64),
    NegInfinity,
    PosInfinity,
}

impl ScoreBound {
    /// Inclusive or exclusive bound at `score`.
    pub fn at(score: f64, inclusive: bool) -> Self {
        if inclusive {
            Self::Inclusive(score)
        } else {
            Self::Exclusive(score)
        }
    }
}

impl fmt::Display for ScoreBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inclusive(score) => write_score(f, *score),
            Self::Exclusive(score) => {
                f.write_str("(")?;
                write_score(f, *score)
            }
            Self::NegInfinity => f.write_str(MIN_SCORE),
            Self::PosInfinity => f.write_str(MAX_SCORE),
        }
    }
}

fn write_score(f: &mut fmt::Formatter<'_>, score: f64) -> fmt::Result {
    if score == f64::INFINITY {
        f.write_str(MAX_SCORE)
    } else if score == f64::NEG_INFINITY {
        f.write_str(MIN_SCORE)
    } else {
        write!(f, "{}", score)
    }
}

impl ToRedisArgs for ScoreBound {
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        out.write_arg(self.to_string().as_bytes());
    }
}

/// Score-ordered set bound to a single key.
#[derive(Clone)]
pub struct RedisSortedSet {
    handle: KeyHandle,
}

impl RedisSortedSet {
    /// Create a sorted-set accessor with auto refresh enabled.
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

    // ============= Mutations =============

    /// Add or update `(member, score)` pairs. Returns the number of new members.
    pub async fn add<M>(&self, items: &[(M, f64)]) -> RedisResult<i64>
    where
        M: ToRedisArgs + Sync,
    {
        if items.is_empty() {
            return Ok(0);
        }

        let cmd = zadd_cmd(self.handle.key(), items.iter().map(|(m, s)| (m, *s)));
        let mut conn = self.handle.conn().await;
        let result = cmd.query_async(&mut *conn).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    pub async fn add_one(&self, member: &str, score: f64) -> RedisResult<i64> {
        self.add(&[(member, score)]).await
    }

    /// Remove one member or every element of a slice.
    pub async fn remove<M>(&self, members: M) -> RedisResult<i64>
    where
        M: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.handle.conn().await;
        let result = conn.zrem(self.handle.key(), members).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Remove members ranked `start..=stop` (0-based, ascending).
    pub async fn remove_range_by_rank(&self, start: isize, stop: isize) -> RedisResult<i64> {
        let mut conn = self.handle.conn().await;
        let result = conn.zremrangebyrank(self.handle.key(), start, stop).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Remove members with a score inside `[min, max]`.
    pub async fn remove_range_by_score(&self, min: f64, max: f64) -> RedisResult<i64> {
        self.remove_in(ScoreBound::Inclusive(min), ScoreBound::Inclusive(max))
            .await
    }

    /// Remove members scoring below `max` (or up to it with `include_max`).
    pub async fn remove_by_max_score(&self, max: f64, include_max: bool) -> RedisResult<i64> {
        self.remove_in(ScoreBound::NegInfinity, ScoreBound::at(max, include_max))
            .await
    }

    /// Remove members whose score lies between two bounds (ZREMRANGEBYSCORE).
    pub async fn remove_in(&self, min: ScoreBound, max: ScoreBound) -> RedisResult<i64> {
        let mut conn = self.handle.conn().await;
        let result = conn.zrembyscore(self.handle.key(), min, max).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Add `delta` to the score of `member`. Returns the new score.
    pub async fn increment_score(&self, member: &str, delta: f64) -> RedisResult<f64> {
        let mut conn = self.handle.conn().await;
        let result = conn.zincr(self.handle.key(), member, delta).await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    /// Reset every member scoring above zero back to zero.
    ///
    /// Members are written back in ZADD batches of at most
    /// [`ZERO_SCORE_BATCH_SIZE`]. Processing stops at the first failing
    /// command; batches already written are not rolled back. Returns the
    /// number of members re-scored.
    pub async fn zero_scores(&self) -> Result<usize, ZeroScoreError> {
        let key = self.handle.key();
        let mut conn = self.handle.conn().await;

        let members: Vec<String> = conn
            .zrangebyscore(key, ScoreBound::Exclusive(0.0), ScoreBound::PosInfinity)
            .await
            .map_err(|e| {
                warn!(key = %key, error = %e, "Zero scores: member listing failed");
                ZeroScoreError::read_failed(key, e)
            })?;

        if members.is_empty() {
            return Ok(0);
        }

        let mut applied = 0;
        for batch in members.chunks(ZERO_SCORE_BATCH_SIZE) {
            zadd_cmd(key, batch.iter().map(|m| (m, 0.0)))
                .query_async::<_, ()>(&mut *conn)
                .await
                .map_err(|e| {
                    warn!(key = %key, applied, error = %e, "Zero scores: batch write failed");
                    ZeroScoreError::write_failed(key, applied, e)
                })?;
            applied += 1;
        }

        self.handle.refresh(&mut conn).await;

        debug!(key = %key, members = members.len(), batches = applied, "Scores reset to zero");
        Ok(members.len())
    }

    /// Keep only the members also present in `other_key`.
    ///
    /// Scores of this set are kept as-is (weights 1 and 0). Returns the
    /// resulting cardinality.
    pub async fn intersect(&self, other_key: &str) -> RedisResult<i64> {
        let key = self.handle.key();
        let mut conn = self.handle.conn().await;
        let result = redis::cmd("ZINTERSTORE")
            .arg(key)
            .arg(2)
            .arg(key)
            .arg(other_key)
            .arg("WEIGHTS")
            .arg(1)
            .arg(0)
            .query_async(&mut *conn)
            .await;
        self.handle.refresh_after(&mut conn, &result).await;
        result
    }

    // ============= Counts =============

    /// Cardinality (ZCARD).
    pub async fn count(&self) -> RedisResult<i64> {
        let mut conn = self.handle.conn().await;
        conn.zcard(self.handle.key()).await
    }

    /// Members with a score inside `[min, max]`.
    pub async fn count_by_score(&self, min: f64, max: f64) -> RedisResult<i64> {
        self.count_in(ScoreBound::Inclusive(min), ScoreBound::Inclusive(max))
            .await
    }

    /// Members with a score of at least `min`.
    pub async fn count_by_min_score(&self, min: f64) -> RedisResult<i64> {
        self.count_in(ScoreBound::Inclusive(min), ScoreBound::PosInfinity)
            .await
    }

    /// Members with a score of at most `max`.
    pub async fn count_by_max_score(&self, max: f64) -> RedisResult<i64> {
        self.count_in(ScoreBound::NegInfinity, ScoreBound::Inclusive(max))
            .await
    }

    pub async fn count_in(&self, min: ScoreBound, max: ScoreBound) -> RedisResult<i64> {
        let mut conn = self.handle.conn().await;
        conn.zcount(self.handle.key(), min, max).await
    }

    // ============= Reads =============

    /// Score of `member`, `None` when it is not in the set.
    pub async fn score(&self, member: &str) -> RedisResult<Option<f64>> {
        let mut conn = self.handle.conn().await;
        conn.zscore(self.handle.key(), member).await
    }

    /// Members ranked `start..=stop`, lowest score first.
    pub async fn members_by_rank(&self, start: isize, stop: isize) -> RedisResult<Vec<String>> {
        let mut conn = self.handle.conn().await;
        conn.zrange(self.handle.key(), start, stop).await
    }

    pub async fn members_with_scores(
        &self,
        start: isize,
        stop: isize,
    ) -> RedisResult<Vec<(String, f64)>> {
        let mut conn = self.handle.conn().await;
        conn.zrange_withscores(self.handle.key(), start, stop).await
    }

    /// Members ranked `start..=stop`, highest score first.
    pub async fn members_by_rank_rev(&self, start: isize, stop: isize) -> RedisResult<Vec<String>> {
        let mut conn = self.handle.conn().await;
        conn.zrevrange(self.handle.key(), start, stop).await
    }

    pub async fn members_with_scores_rev(
        &self,
        start: isize,
        stop: isize,
    ) -> RedisResult<Vec<(String, f64)>> {
        let mut conn = self.handle.conn().await;
        conn.zrevrange_withscores(self.handle.key(), start, stop)
            .await
    }

    /// The `limit` highest scoring members with their scores.
    pub async fn top_with_scores(&self, limit: usize) -> RedisResult<Vec<(String, f64)>> {
        let mut conn = self.handle.conn().await;
        redis::cmd("ZREVRANGEBYSCORE")
            .arg(self.handle.key())
            .arg(ScoreBound::PosInfinity)
            .arg(ScoreBound::NegInfinity)
            .arg("WITHSCORES")
            .arg("LIMIT")
            .arg(0)
            .arg(limit)
            .query_async(&mut *conn)
            .await
    }

    /// Members with a score inside `[min, max]`, lowest first.
    pub async fn members_by_score(&self, min: f64, max: f64) -> RedisResult<Vec<String>> {
        self.members_in(ScoreBound::Inclusive(min), ScoreBound::Inclusive(max))
            .await
    }

    /// Members scoring above `min` (or from it with `include_min`).
    pub async fn members_by_min_score(
        &self,
        min: f64,
        include_min: bool,
    ) -> RedisResult<Vec<String>> {
        self.members_in(ScoreBound::at(min, include_min), ScoreBound::PosInfinity)
            .await
    }

    /// Members scoring below `max` (or up to it with `include_max`).
    pub async fn members_by_max_score(
        &self,
        max: f64,
        include_max: bool,
    ) -> RedisResult<Vec<String>> {
        self.members_in(ScoreBound::NegInfinity, ScoreBound::at(max, include_max))
            .await
    }

    pub async fn members_in(&self, min: ScoreBound, max: ScoreBound) -> RedisResult<Vec<String>> {
        let mut conn = self.handle.conn().await;
        conn.zrangebyscore(self.handle.key(), min, max).await
    }
}

/// `ZADD key score member [score member ...]`
fn zadd_cmd<M, I>(key: &str, items: I) -> Cmd
where
    M: ToRedisArgs,
    I: IntoIterator<Item = (M, f64)>,
{
    let mut cmd = redis::cmd("ZADD");
    cmd.arg(key);
    for (member, score) in items {
        cmd.arg(score).arg(member);
    }
    cmd
}
