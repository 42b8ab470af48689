use serde::{Deserialize, Serialize};

/// A book document as stored in the collection.
///
/// Every field is a string, including the numeric-looking `pages` and `year`.
/// Request bodies may use either the short keys or the legacy
/// `ID`/`BookName`/`BookAuthor`/... keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, alias = "ID")]
    pub id: String,
    #[serde(default, alias = "BookName")]
    pub title: String,
    #[serde(default, alias = "BookAuthor")]
    pub author: String,
    #[serde(default, alias = "BookEdition")]
    pub edition: String,
    #[serde(default, alias = "BookPages")]
    pub pages: String,
    #[serde(default, alias = "BookYear")]
    pub year: String,
}

impl Book {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn edition(mut self, edition: impl Into<String>) -> Self {
        self.edition = edition.into();
        self
    }

    pub fn pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = pages.into();
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// Overwrite the fields present in `update`. The identifier never changes.
    pub fn apply(&mut self, update: &BookUpdate) {
        let fields = [
            (&mut self.title, &update.title),
            (&mut self.author, &update.author),
            (&mut self.edition, &update.edition),
            (&mut self.pages, &update.pages),
            (&mut self.year, &update.year),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }
    }
}

/// Replacement values for a stored book; `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookUpdate {
    #[serde(default, alias = "BookName")]
    pub title: Option<String>,
    #[serde(default, alias = "BookAuthor")]
    pub author: Option<String>,
    #[serde(default, alias = "BookEdition")]
    pub edition: Option<String>,
    #[serde(default, alias = "BookPages")]
    pub pages: Option<String>,
    #[serde(default, alias = "BookYear")]
    pub year: Option<String>,
}

/// Exact-match filter over book fields. An empty filter matches every book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub edition: Option<String>,
    pub pages: Option<String>,
    pub year: Option<String>,
}

impl BookFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn matches(&self, book: &Book) -> bool {
        let checks = [
            (&self.id, &book.id),
            (&self.title, &book.title),
            (&self.author, &book.author),
            (&self.edition, &book.edition),
            (&self.pages, &book.pages),
            (&self.year, &book.year),
        ];
        checks
            .into_iter()
            .all(|(expected, actual)| expected.as_ref().is_none_or(|e| e == actual))
    }
}
