//! These tests start a real Redis in a container and need a Docker daemon.
//! Run them with `cargo test -p shortlink-store -- --ignored`.

use std::time::Duration;

use redis::AsyncCommands;
use shortlink_core::{Fingerprint, LinkKey, LinkStore, ShortCode, StoreError};
use shortlink_store::RedisLinkStore;
use shortlink_test_infra::redis::RedisServer;

async fn start() -> (RedisServer, RedisLinkStore) {
    let server = RedisServer::start()
        .await
        .expect("Failed to start Redis container");
    let url = server.url(0).await.expect("Failed to get Redis url");
    let store = RedisLinkStore::connect(&url)
        .await
        .expect("Failed to connect to Redis");
    (server, store)
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn increment_is_sequential() {
    let (_server, store) = start().await;

    assert_eq!(store.increment(&LinkKey::Counter).await.unwrap(), 1);
    assert_eq!(store.increment(&LinkKey::Counter).await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn get_set_and_exists() {
    let (_server, store) = start().await;
    let key = LinkKey::Url(ShortCode::from_id(1));

    assert!(store.get_if_present(&key).await.unwrap().is_none());
    assert!(!store.exists(&key).await.unwrap());

    store
        .set_with_expiry(&key, "https://example.com", Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(
        store.get_if_present(&key).await.unwrap().as_deref(),
        Some("https://example.com")
    );
    assert!(store.exists(&key).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn set_all_writes_every_record_with_ttl() {
    let (server, store) = start().await;
    let code = ShortCode::from_id(42);
    let entries = vec![
        (LinkKey::Url(code.clone()), "https://example.com".to_string()),
        (
            LinkKey::Fingerprint(Fingerprint::of("https://example.com")),
            code.to_string(),
        ),
        (LinkKey::Detail(code.clone()), "{\"url\":\"https://example.com\"}".to_string()),
    ];

    store
        .set_all_with_expiry(&entries, Duration::from_secs(300))
        .await
        .unwrap();

    let mut conn = server.connection(0).await.unwrap();
    for (key, value) in &entries {
        let stored: Option<String> = conn.get(key.to_string()).await.unwrap();
        assert_eq!(stored.as_ref(), Some(value));

        let ttl: i64 = conn.ttl(key.to_string()).await.unwrap();
        assert!((1..=300).contains(&ttl), "ttl of {key} was {ttl}");
    }
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn records_expire() {
    let (_server, store) = start().await;
    let key = LinkKey::Url(ShortCode::from_id(7));

    store
        .set_with_expiry(&key, "https://example.com", Duration::from_secs(1))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2_100)).await;

    assert!(store.get_if_present(&key).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn zero_ttl_is_rejected_before_redis() {
    let (_server, store) = start().await;
    let key = LinkKey::Url(ShortCode::from_id(7));

    let err = store
        .set_with_expiry(&key, "https://example.com", Duration::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidTtl(_)));
    assert!(!store.exists(&key).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn stopped_server_is_a_backend_failure() {
    let (server, store) = start().await;
    drop(server);

    assert!(store.get_if_present(&LinkKey::Counter).await.is_err());
    assert!(store.ping().await.is_err());
}
