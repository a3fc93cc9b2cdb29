//! End-to-end orchestrator behavior against mock gateways and real stores.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hyphae_client::{ContentClient, GatewayConfig, GatewayEndpoint};
use hyphae_core::Blob;
use hyphae_db_lmdb::{StoreConfig, open_store};
use hyphae_storage::{BlobStore, NullBlobStore, StorageError, StoredBlob};

/// In-memory store that counts trait calls, for short-circuit assertions.
#[derive(Default)]
struct CountingStore {
    blobs: tokio::sync::RwLock<HashMap<String, StoredBlob>>,
    gets: AtomicUsize,
    puts: AtomicUsize,
}

#[async_trait]
impl BlobStore for CountingStore {
    async fn get(&self, cid: &str) -> Result<Option<StoredBlob>, StorageError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.blobs.read().await.get(cid).cloned())
    }

    async fn put(&self, cid: &str, blob: &Blob) -> Result<(), StorageError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.blobs
            .write()
            .await
            .insert(cid.to_string(), StoredBlob::new(cid, blob.clone()));
        Ok(())
    }

    async fn delete(&self, cid: &str) -> Result<(), StorageError> {
        self.blobs.write().await.remove(cid);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.blobs.read().await.keys().cloned().collect())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.blobs.write().await.clear();
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "counting"
    }
}

/// Store whose every operation fails, for degradation assertions.
struct FailingStore;

#[async_trait]
impl BlobStore for FailingStore {
    async fn get(&self, _cid: &str) -> Result<Option<StoredBlob>, StorageError> {
        Err(StorageError::backend("injected read failure"))
    }

    async fn put(&self, _cid: &str, _blob: &Blob) -> Result<(), StorageError> {
        Err(StorageError::backend("injected write failure"))
    }

    async fn delete(&self, _cid: &str) -> Result<(), StorageError> {
        Err(StorageError::backend("injected failure"))
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        Err(StorageError::backend("injected failure"))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        Err(StorageError::backend("injected failure"))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Four endpoints on one mock server, distinguished by path prefix.
fn mock_gateways(server_uri: &str) -> GatewayConfig {
    let endpoints = (1..=4)
        .map(|i| GatewayEndpoint::new(format!("gw{i}"), format!("{server_uri}/gw{i}/")))
        .collect();
    GatewayConfig::new()
        .with_endpoints(endpoints)
        .with_request_timeout(Duration::from_secs(2))
}

/// Polls until the counting store holds `cid` or a second passes.
async fn wait_for_persist(store: &CountingStore, cid: &str) {
    for _ in 0..100 {
        if store.blobs.read().await.contains_key(cid) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("blob {cid} was never persisted");
}

#[tokio::test]
async fn fallback_success_is_returned_and_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw1/Qm123"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gw2/Qm123"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(CountingStore::default());
    let client = ContentClient::new(store.clone(), mock_gateways(&server.uri()));

    let blob = client
        .fetch_with_cache("Qm123")
        .await
        .expect("second gateway should serve the blob");
    assert_eq!(blob.text(), "hello");

    // Two attempts were made, in priority order.
    let requests = server.received_requests().await.expect("requests recorded");
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(paths, ["/gw1/Qm123", "/gw2/Qm123"]);

    // The caller was not blocked on persistence, but the entry arrives.
    wait_for_persist(&store, "Qm123").await;
    assert_eq!(store.puts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cached_blob_short_circuits_the_network() {
    let server = MockServer::start().await;

    // Any network traffic at all fails the test.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(CountingStore::default());
    store
        .blobs
        .write()
        .await
        .insert(
            "QmCached".to_string(),
            StoredBlob::new("QmCached", Blob::new(b"cached content".to_vec())),
        );

    let client = ContentClient::new(store.clone(), mock_gateways(&server.uri()));
    let blob = client
        .fetch_with_cache("QmCached")
        .await
        .expect("store should serve the blob");
    assert_eq!(blob.text(), "cached content");
    assert_eq!(store.gets.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_input_touches_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(CountingStore::default());
    let client = ContentClient::new(store.clone(), mock_gateways(&server.uri()));

    assert!(client.fetch_with_cache("").await.is_none());
    assert!(client.fetch_with_cache("   ").await.is_none());

    assert_eq!(store.gets.load(Ordering::SeqCst), 0);
    assert_eq!(store.puts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn total_failure_attempts_every_endpoint_once() {
    let server = MockServer::start().await;

    for i in 1..=4 {
        Mock::given(method("GET"))
            .and(path(format!("/gw{i}/QmGone")))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;
    }

    let store = Arc::new(CountingStore::default());
    let client = ContentClient::new(store.clone(), mock_gateways(&server.uri()));

    assert!(client.fetch_with_cache("QmGone").await.is_none());

    let requests = server.received_requests().await.expect("requests recorded");
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(
        paths,
        ["/gw1/QmGone", "/gw2/QmGone", "/gw3/QmGone", "/gw4/QmGone"]
    );

    // Nothing to persist after a total failure.
    assert_eq!(store.puts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ipfs_scheme_is_stripped_before_building_urls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw1/QmFoo"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(CountingStore::default());
    let client = ContentClient::new(store.clone(), mock_gateways(&server.uri()));

    assert!(client.fetch_with_cache("ipfs://QmFoo").await.is_some());

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);
    let url = requests[0].url.to_string();
    assert!(url.contains("QmFoo"));
    assert!(!url.contains("ipfs://"));
}

#[tokio::test]
async fn direct_urls_bypass_both_caches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/asset.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"direct".to_vec()))
        .expect(2)
        .mount(&server)
        .await;

    let store = Arc::new(CountingStore::default());
    let client = ContentClient::new(store.clone(), mock_gateways(&server.uri()));
    let url = format!("{}/asset.bin", server.uri());

    // Both calls go to the network; neither touches the store.
    for _ in 0..2 {
        let blob = client
            .fetch_with_cache(&url)
            .await
            .expect("direct fetch should succeed");
        assert_eq!(blob.text(), "direct");
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.gets.load(Ordering::SeqCst), 0);
    assert_eq!(store.puts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn second_fetch_makes_zero_network_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw1/QmOnce"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(CountingStore::default());
    let client = ContentClient::new(store.clone(), mock_gateways(&server.uri()));

    let first = client
        .fetch_with_cache("QmOnce")
        .await
        .expect("first fetch should succeed");
    wait_for_persist(&store, "QmOnce").await;

    let second = client
        .fetch_with_cache("QmOnce")
        .await
        .expect("second fetch should be served locally");
    assert_eq!(first.text(), second.text());

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn failing_store_degrades_to_network_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw1/QmDegraded"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"still works".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ContentClient::new(Arc::new(FailingStore), mock_gateways(&server.uri()));
    let blob = client
        .fetch_with_cache("QmDegraded")
        .await
        .expect("a broken store must not break fetching");
    assert_eq!(blob.text(), "still works");
}

#[tokio::test]
async fn null_store_runtime_behaves_like_no_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw1/QmNull"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bytes".to_vec()))
        .expect(2)
        .mount(&server)
        .await;

    let client = ContentClient::new(Arc::new(NullBlobStore::new()), mock_gateways(&server.uri()));

    // Without a durable backend every fetch walks the network, harmlessly.
    for _ in 0..2 {
        assert!(client.fetch_with_cache("QmNull").await.is_some());
    }
}

#[tokio::test]
async fn lmdb_store_end_to_end() {
    let server = MockServer::start().await;
    let temp_dir = tempfile::TempDir::new().expect("TempDir creation should succeed");

    Mock::given(method("GET"))
        .and(path("/gw1/QmDurable"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"durable bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let store = open_store(&StoreConfig::lmdb(temp_dir.path())).expect("open should succeed");
    let client = ContentClient::new(store.clone(), mock_gateways(&server.uri()));

    let blob = client
        .fetch_with_cache("QmDurable")
        .await
        .expect("gateway should serve the blob");
    assert_eq!(blob.text(), "durable bytes");

    // Wait for the detached persist to land in LMDB.
    let mut persisted = false;
    for _ in 0..100 {
        if store
            .get("QmDurable")
            .await
            .expect("get should succeed")
            .is_some()
        {
            persisted = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(persisted, "blob never reached the LMDB store");

    // The repeat fetch is served locally; the mock still expects one request.
    let again = client
        .fetch_with_cache("QmDurable")
        .await
        .expect("repeat fetch should be served locally");
    assert_eq!(again.text(), "durable bytes");
}

#[tokio::test]
async fn fetch_text_is_served_from_the_content_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw1/QmText"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hi there".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    // Null store: only the content cache can make the second call cheap.
    let client = ContentClient::new(Arc::new(NullBlobStore::new()), mock_gateways(&server.uri()));

    let first = client
        .fetch_text("QmText", Duration::from_secs(60))
        .await
        .expect("fetch_text should succeed");
    let second = client
        .fetch_text("QmText", Duration::from_secs(60))
        .await
        .expect("cached text should be returned");
    assert_eq!(first, "hi there");
    assert_eq!(second, "hi there");
}

#[tokio::test]
async fn fetch_json_parses_and_caches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw1/QmJson"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(br#"{"n":7}"#.to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ContentClient::new(Arc::new(NullBlobStore::new()), mock_gateways(&server.uri()));

    let value = client
        .fetch_json("QmJson", Duration::from_secs(60))
        .await
        .expect("fetch_json should succeed");
    assert_eq!(value["n"], 7);

    // Second call is answered by the content cache (mock expects one request).
    let cached = client
        .fetch_json("QmJson", Duration::from_secs(60))
        .await
        .expect("cached JSON should be returned");
    assert_eq!(cached, value);
}

#[tokio::test]
async fn invalid_json_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw1/QmNotJson"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"plain text".to_vec()))
        .expect(2)
        .mount(&server)
        .await;

    let client = ContentClient::new(Arc::new(NullBlobStore::new()), mock_gateways(&server.uri()));

    // Parse failures resolve to None and leave no cache entry behind, so the
    // second call fetches again.
    assert!(
        client
            .fetch_json("QmNotJson", Duration::from_secs(60))
            .await
            .is_none()
    );
    assert!(
        client
            .fetch_json("QmNotJson", Duration::from_secs(60))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn candidate_urls_follow_normalization() {
    let client = ContentClient::new(
        Arc::new(NullBlobStore::new()),
        GatewayConfig::default(),
    );

    assert!(client.candidate_urls("").is_empty());

    assert_eq!(
        client.candidate_urls("https://example.com/x"),
        vec!["https://example.com/x".to_string()]
    );

    let urls = client.candidate_urls("ipfs://QmList");
    assert_eq!(urls.len(), 4);
    for url in &urls {
        assert!(url.ends_with("QmList"));
        assert!(!url.contains("ipfs://"));
    }
}
