//! Error types for multi-command maintenance routines
//!
//! Single-command accessor methods return `redis::RedisResult` unchanged.

use thiserror::Error;

/// Generic failure code carried by maintenance errors.
pub const ERR_FAIL: i32 = -1;

/// Sorted-set zero-scores failure.
///
/// Batches written before the failing step stay applied; `applied_batches`
/// tells how many.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ZeroScoreError {
    pub code: i32,
    pub message: String,
    pub applied_batches: usize,
    #[source]
    pub source: redis::RedisError,
}

impl ZeroScoreError {
    pub(crate) fn read_failed(key: &str, source: redis::RedisError) -> Self {
        Self {
            code: ERR_FAIL,
            message: format!("failed to list members with score > 0: {} err: {}", key, source),
            applied_batches: 0,
            source,
        }
    }

    pub(crate) fn write_failed(key: &str, applied_batches: usize, source: redis::RedisError) -> Self {
        Self {
            code: ERR_FAIL,
            message: format!("failed to reset scores: {} err: {}", key, source),
            applied_batches,
            source,
        }
    }
}
