//! Redis collection accessors
//!
//! Thin wrappers binding one key of a shared connection to the commands of
//! a single Redis collection type:
//! - [`RedisList`] and the bounded [`RedisQueue`]
//! - [`RedisHash`]
//! - [`RedisSet`]
//! - [`RedisSortedSet`]
//!
//! Each accessor carries an [`Expiry`]. With auto refresh on and a positive
//! TTL, a successful command re-arms the key's expiration (sliding TTL). The
//! refresh is a second command and is not atomic with the first.
//!
//! Accessors never own the connection: they hold a clone of the
//! [`SharedConnectionManager`] the caller built with [`connect`].
//!
//! ```no_run
//! use redis_utils::{connect, RedisConfig, RedisQueue};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let redis = connect(&RedisConfig::from_env()).await?;
//! let recent = RedisQueue::with_max_size(redis, "events:recent", 3600, 100);
//! recent.push("login").await?;
//! # Ok(())
//! # }
//! ```

mod connection;
mod error;
mod handle;
mod hash;
mod list;
mod queue;
mod set;
mod zset;

pub use connection::{connect, RedisConfig, SharedConnectionManager, DEFAULT_REDIS_URL};
pub use error::{ZeroScoreError, ERR_FAIL};
pub use handle::Expiry;
pub use hash::RedisHash;
pub use list::RedisList;
pub use queue::RedisQueue;
pub use set::RedisSet;
pub use zset::{RedisSortedSet, ScoreBound, MAX_SCORE, MIN_SCORE, ZERO_SCORE_BATCH_SIZE};
