pub mod collection;
pub mod memory;
pub mod persistence;

pub use collection::Collection;
pub use memory::InMemoryStore;
pub use persistence::{SnapshotFile, SnapshotStore};

use crate::core::{Book, BookFilter, BookUpdate, Result};
use async_trait::async_trait;

/// Book collection with exact-match filter operations.
///
/// Handlers and the aggregator hold this as `Arc<dyn DocumentStore>`, so any
/// implementation can be swapped in, including an in-memory one in tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a book. Retrieval order is insertion order.
    async fn insert_one(&self, book: Book) -> Result<()>;

    /// Number of books matching `filter`
    async fn count(&self, filter: &BookFilter) -> Result<u64>;

    /// Apply `update` to the first book matching `filter` and return the
    /// number of matched books (0 or 1).
    async fn update_one(&self, filter: &BookFilter, update: &BookUpdate) -> Result<u64>;

    /// Remove the first book matching `filter` and return how many were removed.
    async fn delete_one(&self, filter: &BookFilter) -> Result<u64>;

    async fn find_all(&self) -> Result<Vec<Book>>;
}
