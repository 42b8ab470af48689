use crate::core::{Book, BookFilter, Result};
use crate::storage::DocumentStore;
use tracing::info;

/// Sample books inserted into an empty collection at start-up
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new("9780553283686", "Hyperion")
            .author("Dan Simmons")
            .edition("1st")
            .pages("482")
            .year("1989"),
        Book::new("9780441013593", "Dune")
            .author("Frank Herbert")
            .edition("40th Anniversary")
            .pages("528")
            .year("1965"),
        Book::new("9780060850524", "Brave New World")
            .author("Aldous Huxley")
            .edition("Reissue")
            .pages("288")
            .year("1932"),
        Book::new("9780451524935", "Nineteen Eighty-Four")
            .author("George Orwell")
            .edition("Signet Classics")
            .pages("328")
            .year("1949"),
    ]
}

/// Insert [`sample_books`] when the store holds no documents.
///
/// Returns how many books were inserted.
pub async fn seed_if_empty(store: &dyn DocumentStore) -> Result<usize> {
    if store.count(&BookFilter::all()).await? > 0 {
        return Ok(0);
    }

    let books = sample_books();
    let inserted = books.len();
    for book in books {
        store.insert_one(book).await?;
    }
    info!(books = inserted, "seeded empty collection");
    Ok(inserted)
}
