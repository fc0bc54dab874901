//! Behavioural tests for the trust-on-first-write cache.

use std::fs;

use pretty_assertions::assert_eq;
use srfi_fetch::{CachePath, ContentCache, FetchError, MemoryTransport};

const URL: &str = "https://mirror.example.org/srfi-1.html";

fn cache_with(transport: MemoryTransport) -> (tempfile::TempDir, ContentCache<MemoryTransport>) {
    let temp = tempfile::tempdir().expect("tempdir should create");
    let cache = ContentCache::new(CachePath::new(temp.path().join("cache")), transport);
    (temp, cache)
}

#[tokio::test]
async fn second_fetch_is_served_from_disk() {
    let (_temp, cache) = cache_with(MemoryTransport::new().with(URL, "<title>SRFI 1</title>"));

    let first = cache.fetch("srfi-1.html", URL).await.unwrap();
    let second = cache.fetch("srfi-1.html", URL).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, b"<title>SRFI 1</title>".to_vec());
    assert_eq!(cache.transport().requests(URL), 1);
}

#[tokio::test]
async fn existing_key_is_never_revalidated() {
    let (_temp, cache) = cache_with(MemoryTransport::new().with(URL, "fresh"));
    let root = cache.root().root().to_path_buf();
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("srfi-1.html"), "stale but trusted").unwrap();

    let bytes = cache.fetch("srfi-1.html", URL).await.unwrap();
    assert_eq!(bytes, b"stale but trusted".to_vec());
    assert_eq!(cache.transport().total_requests(), 0);
}

#[tokio::test]
async fn key_is_independent_of_url_path() {
    let (_temp, cache) = cache_with(MemoryTransport::new().with(URL, "body"));
    cache.fetch("mirrors/one.html", URL).await.unwrap();

    let stored = cache.root().path_for("mirrors/one.html").unwrap();
    assert_eq!(fs::read(stored).unwrap(), b"body".to_vec());
}

#[tokio::test]
async fn failed_status_leaves_no_file() {
    let (_temp, cache) = cache_with(MemoryTransport::new());

    let err = cache.fetch("srfi-1.html", URL).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert!(!cache.root().path_for("srfi-1.html").unwrap().exists());
    assert!(cache.root().entries().unwrap().is_empty());
}

#[tokio::test]
async fn truncated_download_is_never_visible_and_is_retried() {
    let (_temp, broken) =
        cache_with(MemoryTransport::new().with_truncated(URL, "<html><title>SRFI"));
    assert!(broken.fetch("srfi-1.html", URL).await.is_err());
    let key_path = broken.root().path_for("srfi-1.html").unwrap();
    assert!(!key_path.exists());

    // A later run over the same root sees a miss and downloads again.
    let retry = ContentCache::new(
        broken.root().clone(),
        MemoryTransport::new().with(URL, "<html><title>SRFI 1</title></html>"),
    );
    let bytes = retry.fetch("srfi-1.html", URL).await.unwrap();
    assert_eq!(bytes, b"<html><title>SRFI 1</title></html>".to_vec());
    assert_eq!(retry.transport().requests(URL), 1);
}

#[tokio::test]
async fn concurrent_fetches_of_one_key_download_once() {
    let (_temp, cache) = cache_with(MemoryTransport::new().with(URL, "shared"));

    let results = futures::future::join_all(
        (0..8).map(|_| cache.fetch("srfi-1.html", URL)),
    )
    .await;

    for result in results {
        assert_eq!(result.unwrap(), b"shared".to_vec());
    }
    assert_eq!(cache.transport().requests(URL), 1);
}

#[tokio::test]
async fn entries_and_clean_partial_skip_committed_keys() {
    let (_temp, cache) = cache_with(
        MemoryTransport::new()
            .with(URL, "abc")
            .with("https://example.org/r4rs.tar.gz", vec![0u8; 16]),
    );
    cache.fetch("srfi-1.html", URL).await.unwrap();
    cache
        .fetch("r4rs.tar.gz", "https://example.org/r4rs.tar.gz")
        .await
        .unwrap();

    let root = cache.root().root();
    fs::write(root.join(".download-abc123.part"), "partial").unwrap();

    let keys: Vec<_> = cache
        .root()
        .entries()
        .unwrap()
        .into_iter()
        .map(|entry| (entry.key, entry.size_bytes))
        .collect();
    assert_eq!(
        keys,
        vec![("r4rs.tar.gz".to_string(), 16), ("srfi-1.html".to_string(), 3)]
    );

    assert_eq!(cache.root().clean_partial().unwrap(), 1);
    assert!(!root.join(".download-abc123.part").exists());
    assert!(root.join("srfi-1.html").exists());
}
