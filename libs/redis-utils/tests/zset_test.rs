//! Sorted-set accessor against a live Redis.

mod common;

use common::{fresh_key, test_connection, ttl};
use redis::AsyncCommands;
use redis_utils::{RedisSortedSet, ScoreBound, ERR_FAIL, ZERO_SCORE_BATCH_SIZE};

async fn seeded(name: &str) -> Option<RedisSortedSet> {
    let redis = test_connection().await?;
    let key = fresh_key(&redis, name).await;
    let zset = RedisSortedSet::new(redis, key, 60);
    zset.add(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)])
        .await
        .unwrap();
    Some(zset)
}

#[tokio::test]
async fn test_ranked_reads() {
    let Some(zset) = seeded("zset_ranked").await else {
        return;
    };

    assert_eq!(zset.count().await.unwrap(), 4);
    assert_eq!(zset.members_by_rank(0, 1).await.unwrap(), vec!["a", "b"]);
    assert_eq!(zset.members_by_rank_rev(0, 1).await.unwrap(), vec!["d", "c"]);
    assert_eq!(
        zset.members_with_scores(2, -1).await.unwrap(),
        vec![("c".to_string(), 3.0), ("d".to_string(), 4.0)]
    );
    assert_eq!(
        zset.members_with_scores_rev(0, 0).await.unwrap(),
        vec![("d".to_string(), 4.0)]
    );
    assert_eq!(
        zset.top_with_scores(2).await.unwrap(),
        vec![("d".to_string(), 4.0), ("c".to_string(), 3.0)]
    );
}

#[tokio::test]
async fn test_score_filtered_reads_and_counts() {
    let Some(zset) = seeded("zset_scores").await else {
        return;
    };

    assert_eq!(zset.members_by_score(2.0, 3.0).await.unwrap(), vec!["b", "c"]);
    assert_eq!(zset.members_by_min_score(2.0, true).await.unwrap(), vec!["b", "c", "d"]);
    assert_eq!(zset.members_by_min_score(2.0, false).await.unwrap(), vec!["c", "d"]);
    assert_eq!(zset.members_by_max_score(3.0, false).await.unwrap(), vec!["a", "b"]);
    assert_eq!(
        zset.members_in(ScoreBound::Exclusive(1.0), ScoreBound::Exclusive(4.0))
            .await
            .unwrap(),
        vec!["b", "c"]
    );

    assert_eq!(zset.count_by_score(1.0, 3.0).await.unwrap(), 3);
    assert_eq!(zset.count_by_min_score(3.0).await.unwrap(), 2);
    assert_eq!(zset.count_by_max_score(1.0).await.unwrap(), 1);

    assert_eq!(zset.score("c").await.unwrap(), Some(3.0));
    assert_eq!(zset.score("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn test_removals_and_increment() {
    let Some(zset) = seeded("zset_remove").await else {
        return;
    };

    assert_eq!(zset.increment_score("a", 10.5).await.unwrap(), 11.5);
    // order is now b, c, d, a
    assert_eq!(zset.remove_range_by_rank(0, 0).await.unwrap(), 1);
    assert_eq!(zset.members_by_rank(0, -1).await.unwrap(), vec!["c", "d", "a"]);

    assert_eq!(zset.remove_range_by_score(3.0, 4.0).await.unwrap(), 2);
    zset.add_one("e", 20.0).await.unwrap();
    assert_eq!(zset.remove_by_max_score(20.0, false).await.unwrap(), 1);
    assert_eq!(zset.remove("e").await.unwrap(), 1);
    assert_eq!(zset.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_zero_scores_keeps_membership() {
    let Some(redis) = test_connection().await else {
        return;
    };
    let key = fresh_key(&redis, "zset_zero").await;
    let zset = RedisSortedSet::new(redis.clone(), key.clone(), 60);

    // more than two batches worth, plus members already at or below zero
    let total = ZERO_SCORE_BATCH_SIZE * 2 + 37;
    let items: Vec<(String, f64)> = (0..total)
        .map(|i| (format!("m{}", i), (i + 1) as f64))
        .collect();
    zset.add(&items).await.unwrap();
    zset.add(&[("zero", 0.0), ("negative", -3.0)]).await.unwrap();

    let mut before = zset.members_by_rank(0, -1).await.unwrap();
    before.sort();

    assert_eq!(zset.zero_scores().await.unwrap(), total);

    let mut after = zset.members_by_rank(0, -1).await.unwrap();
    after.sort();
    assert_eq!(before, after);

    assert_eq!(zset.count_by_score(0.0, 0.0).await.unwrap(), total as i64 + 1);
    assert_eq!(zset.score("negative").await.unwrap(), Some(-3.0));

    // nothing left above zero
    assert_eq!(zset.zero_scores().await.unwrap(), 0);
}

#[tokio::test]
async fn test_zero_scores_on_wrong_type_fails() {
    let Some(redis) = test_connection().await else {
        return;
    };
    let key = fresh_key(&redis, "zset_zero_wrongtype").await;
    {
        let mut conn = redis.lock().await;
        let _: () = conn.set(&key, "plain").await.unwrap();
    }

    let zset = RedisSortedSet::new(redis.clone(), key.clone(), 60);
    let err = zset.zero_scores().await.unwrap_err();

    assert_eq!(err.code, ERR_FAIL);
    assert_eq!(err.applied_batches, 0);
    assert!(err.message.contains(&key));
    assert_eq!(err.source.code(), Some("WRONGTYPE"));

    // failed run leaves the key without an expiration
    assert_eq!(ttl(&redis, &key).await, -1);
}

#[tokio::test]
async fn test_intersect_filters_members() {
    let Some(redis) = test_connection().await else {
        return;
    };
    let key = fresh_key(&redis, "zset_inter_main").await;
    let other_key = fresh_key(&redis, "zset_inter_other").await;
    let zset = RedisSortedSet::new(redis.clone(), key.clone(), 60);
    let other = RedisSortedSet::new(redis.clone(), other_key.clone(), 60);

    zset.add(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]).await.unwrap();
    other.add(&[("b", 100.0), ("c", 200.0), ("x", 1.0)]).await.unwrap();

    assert_eq!(zset.intersect(&other_key).await.unwrap(), 2);
    assert_eq!(
        zset.members_with_scores(0, -1).await.unwrap(),
        vec![("b".to_string(), 2.0), ("c".to_string(), 3.0)]
    );
}

#[tokio::test]
async fn test_reads_do_not_refresh_ttl() {
    let Some(zset) = seeded("zset_ttl").await else {
        return;
    };
    let Some(redis) = test_connection().await else {
        return;
    };

    zset.expire_seconds(5).await.unwrap();
    zset.members_by_rank(0, -1).await.unwrap();
    assert!(ttl(&redis, zset.key()).await <= 5);

    zset.add_one("z", 9.0).await.unwrap();
    assert!(ttl(&redis, zset.key()).await > 50);
}
