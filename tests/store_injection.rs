use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use bookstore::{
    AppState, AuthorGroup, Book, BookFilter, BookUpdate, DocumentStore, InMemoryStore,
    SnapshotStore, StoreError, YearGroup, aggregate, build_router, seed::seed_if_empty,
};
use serde_json::Value;
use tower::ServiceExt;

/// Store whose reads always fail
struct UnavailableStore;

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn insert_one(&self, _book: Book) -> bookstore::Result<()> {
        Err(StoreError::Io("connection refused".to_string()))
    }

    async fn count(&self, _filter: &BookFilter) -> bookstore::Result<u64> {
        Err(StoreError::Io("connection refused".to_string()))
    }

    async fn update_one(&self, _filter: &BookFilter, _update: &BookUpdate) -> bookstore::Result<u64> {
        Err(StoreError::Io("connection refused".to_string()))
    }

    async fn delete_one(&self, _filter: &BookFilter) -> bookstore::Result<u64> {
        Err(StoreError::Io("connection refused".to_string()))
    }

    async fn find_all(&self) -> bookstore::Result<Vec<Book>> {
        Err(StoreError::Io("connection refused".to_string()))
    }
}

/// In-memory store that counts full-collection reads
struct CountingStore {
    inner: InMemoryStore,
    reads: AtomicUsize,
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn insert_one(&self, book: Book) -> bookstore::Result<()> {
        self.inner.insert_one(book).await
    }

    async fn count(&self, filter: &BookFilter) -> bookstore::Result<u64> {
        self.inner.count(filter).await
    }

    async fn update_one(&self, filter: &BookFilter, update: &BookUpdate) -> bookstore::Result<u64> {
        self.inner.update_one(filter, update).await
    }

    async fn delete_one(&self, filter: &BookFilter) -> bookstore::Result<u64> {
        self.inner.delete_one(filter).await
    }

    async fn find_all(&self) -> bookstore::Result<Vec<Book>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all().await
    }
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    let response = app.clone().oneshot(request).await.expect("response expected");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");
    let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

#[tokio::test]
async fn store_failures_surface_as_server_errors() {
    let app = build_router(AppState::new(Arc::new(UnavailableStore)));

    for uri in ["/authors", "/years", "/api/books"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body["code"], "store_error");
        assert_eq!(body["error"], "internal server error");
    }
}

#[tokio::test]
async fn aggregation_reads_the_collection_once() {
    let store = CountingStore {
        inner: InMemoryStore::with_books(vec![
            Book::new("a1", "Book1").author("author1").year("2020"),
            Book::new("a2", "Book2").author("author1").year("2021"),
        ]),
        reads: AtomicUsize::new(0),
    };

    let authors = aggregate::authors(&store).await.unwrap();
    assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    assert_eq!(
        authors,
        vec![AuthorGroup {
            author: "author1".to_string(),
            books: vec!["Book1".to_string(), "Book2".to_string()],
        }]
    );

    let years = aggregate::years(&store).await.unwrap();
    assert_eq!(store.reads.load(Ordering::SeqCst), 2);
    assert_eq!(years.len(), 2);
    assert_eq!(
        years[1],
        YearGroup {
            year: "2021".to_string(),
            books: vec!["Book2".to_string()],
        }
    );
}

#[tokio::test]
async fn repeated_aggregation_is_stable() {
    let store = InMemoryStore::new();
    seed_if_empty(&store).await.unwrap();

    let first = aggregate::authors(&store).await.unwrap();
    let second = aggregate::authors(&store).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[tokio::test]
async fn seeded_snapshot_store_serves_aggregations() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = SnapshotStore::open(dir.path()).await.unwrap();
        assert_eq!(seed_if_empty(&store).await.unwrap(), 4);
        store
            .insert_one(Book::new("extra", "Children of Dune").author("Frank Herbert").year("1976"))
            .await
            .unwrap();
    }

    let store = SnapshotStore::open(dir.path()).await.unwrap();
    assert_eq!(seed_if_empty(&store).await.unwrap(), 0);

    let app = build_router(AppState::new(Arc::new(store)));
    let (status, authors) = get(&app, "/authors").await;
    assert_eq!(status, StatusCode::OK);

    let herbert = authors
        .as_array()
        .expect("authors should be an array")
        .iter()
        .find(|group| group["author"] == "Frank Herbert")
        .expect("Frank Herbert group expected");
    assert_eq!(herbert["books"], serde_json::json!(["Dune", "Children of Dune"]));
}
