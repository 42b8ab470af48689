use super::{Collection, DocumentStore};
use crate::core::{Book, BookFilter, BookUpdate, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Volatile document store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collection: RwLock<Collection>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `books` in the given order
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            collection: RwLock::new(Collection::from_books(books)),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_one(&self, book: Book) -> Result<()> {
        debug!(id = %book.id, "insert book");
        self.collection.write().await.insert(book);
        Ok(())
    }

    async fn count(&self, filter: &BookFilter) -> Result<u64> {
        Ok(self.collection.read().await.count(filter))
    }

    async fn update_one(&self, filter: &BookFilter, update: &BookUpdate) -> Result<u64> {
        Ok(self.collection.write().await.update_one(filter, update))
    }

    async fn delete_one(&self, filter: &BookFilter) -> Result<u64> {
        Ok(self.collection.write().await.delete_one(filter))
    }

    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(self.collection.read().await.books().to_vec())
    }
}
