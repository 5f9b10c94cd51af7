#![allow(dead_code)]

//! Redis helpers shared by the integration tests
//!
//! Uses REDIS_TEST_URL or defaults to localhost. Tests skip themselves when
//! no Redis is reachable.

use redis::AsyncCommands;
use redis_utils::{connect, RedisConfig, SharedConnectionManager};

pub async fn test_connection() -> Option<SharedConnectionManager> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let url = std::env::var("REDIS_TEST_URL")
        .unwrap_or_else(|_| redis_utils::DEFAULT_REDIS_URL.to_string());

    match connect(&RedisConfig::new(url)).await {
        Ok(redis) => Some(redis),
        Err(e) => {
            eprintln!("Skipping test - Redis not available: {:#}", e);
            None
        }
    }
}

/// Per-process key so parallel test runs do not collide. Deleted up front.
pub async fn fresh_key(redis: &SharedConnectionManager, name: &str) -> String {
    let key = format!("redis-utils:test:{}:{}", name, std::process::id());
    let mut conn = redis.lock().await;
    let _: () = conn.del(&key).await.expect("DEL test key");
    key
}

/// Remaining TTL in seconds (-1 no expiry, -2 missing key).
pub async fn ttl(redis: &SharedConnectionManager, key: &str) -> i64 {
    let mut conn = redis.lock().await;
    conn.ttl(key).await.expect("TTL")
}
