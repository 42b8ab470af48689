use crate::core::{Book, BookFilter, BookUpdate};
use serde::{Deserialize, Serialize};

/// Ordered set of book documents.
///
/// Documents keep insertion order; updates happen in place so a book keeps its
/// position for its whole lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    books: Vec<Book>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn insert(&mut self, book: Book) {
        self.books.push(book);
    }

    pub fn count(&self, filter: &BookFilter) -> u64 {
        self.books.iter().filter(|b| filter.matches(b)).count() as u64
    }

    /// Returns the number of matched documents (0 or 1).
    pub fn update_one(&mut self, filter: &BookFilter, update: &BookUpdate) -> u64 {
        match self.books.iter_mut().find(|b| filter.matches(b)) {
            Some(book) => {
                book.apply(update);
                1
            }
            None => 0,
        }
    }

    /// Returns the number of deleted documents (0 or 1).
    pub fn delete_one(&mut self, filter: &BookFilter) -> u64 {
        match self.books.iter().position(|b| filter.matches(b)) {
            Some(index) => {
                self.books.remove(index);
                1
            }
            None => 0,
        }
    }
}
