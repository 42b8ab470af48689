//! Author and year aggregations over the book collection
//!
//! Groups are emitted in order of first appearance of their key, and titles
//! inside a group keep collection order.

use crate::core::{Book, Result};
use crate::storage::DocumentStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Book field used as the grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Author,
    Year,
}

impl GroupField {
    pub fn key<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            GroupField::Author => &book.author,
            GroupField::Year => &book.year,
        }
    }
}

/// A grouping key with the titles that share it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    pub titles: Vec<String>,
}

/// Wire form of an author group: `{"author": .., "books": [..]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorGroup {
    pub author: String,
    pub books: Vec<String>,
}

impl From<Group> for AuthorGroup {
    fn from(group: Group) -> Self {
        Self {
            author: group.key,
            books: group.titles,
        }
    }
}

/// Wire form of a year group: `{"year": .., "books": [..]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearGroup {
    pub year: String,
    pub books: Vec<String>,
}

impl From<Group> for YearGroup {
    fn from(group: Group) -> Self {
        Self {
            year: group.key,
            books: group.titles,
        }
    }
}

/// Group book titles by `field` in a single pass over `books`.
pub fn group_titles(books: &[Book], field: GroupField) -> Vec<Group> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for book in books {
        let key = field.key(book);
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push(Group {
                key: key.to_string(),
                titles: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].titles.push(book.title.clone());
    }

    groups
}

/// Read the whole collection once and group titles by author.
pub async fn authors(store: &dyn DocumentStore) -> Result<Vec<AuthorGroup>> {
    let books = store.find_all().await?;
    Ok(group_titles(&books, GroupField::Author)
        .into_iter()
        .map(AuthorGroup::from)
        .collect())
}

/// Read the whole collection once and group titles by publication year.
pub async fn years(store: &dyn DocumentStore) -> Result<Vec<YearGroup>> {
    let books = store.find_all().await?;
    Ok(group_titles(&books, GroupField::Year)
        .into_iter()
        .map(YearGroup::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, title: &str, author: &str, year: &str) -> Book {
        Book::new(id, title).author(author).year(year)
    }

    fn titles(groups: &[Group]) -> Vec<(&str, Vec<&str>)> {
        groups
            .iter()
            .map(|g| (g.key.as_str(), g.titles.iter().map(String::as_str).collect()))
            .collect()
    }

    #[test]
    fn test_group_by_author() {
        let books = vec![
            book("a1", "Book1", "author1", "2020"),
            book("a2", "Book2", "author1", "2021"),
            book("a3", "Book3", "author2", "2022"),
        ];

        let groups = group_titles(&books, GroupField::Author);
        assert_eq!(
            titles(&groups),
            vec![("author1", vec!["Book1", "Book2"]), ("author2", vec!["Book3"])]
        );
    }

    #[test]
    fn test_group_by_year() {
        let books = vec![
            book("y1", "Book1", "author1", "2020"),
            book("y2", "Book2", "author2", "2020"),
            book("y3", "Book3", "author3", "2021"),
        ];

        let groups = group_titles(&books, GroupField::Year);
        assert_eq!(
            titles(&groups),
            vec![("2020", vec!["Book1", "Book2"]), ("2021", vec!["Book3"])]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(group_titles(&[], GroupField::Author).is_empty());
        assert!(group_titles(&[], GroupField::Year).is_empty());
    }

    #[test]
    fn test_interleaved_keys_keep_first_appearance_order() {
        let books = vec![
            book("1", "T1", "b", "1"),
            book("2", "T2", "a", "2"),
            book("3", "T3", "b", "1"),
            book("4", "T4", "", "2"),
        ];

        let groups = group_titles(&books, GroupField::Author);
        assert_eq!(
            titles(&groups),
            vec![("b", vec!["T1", "T3"]), ("a", vec!["T2"]), ("", vec!["T4"])]
        );
    }

    #[test]
    fn test_groups_partition_the_input() {
        let authors = ["ann", "bob", "cy", "dee"];
        let books: Vec<Book> = (0..40)
            .map(|i| {
                book(
                    &format!("id{i}"),
                    &format!("title{i}"),
                    authors[(i * 7) % authors.len()],
                    &format!("{}", 1990 + (i % 5)),
                )
            })
            .collect();

        for field in [GroupField::Author, GroupField::Year] {
            let groups = group_titles(&books, field);

            let total: usize = groups.iter().map(|g| g.titles.len()).sum();
            assert_eq!(total, books.len());

            for b in &books {
                let containing: Vec<&Group> = groups
                    .iter()
                    .filter(|g| g.titles.contains(&b.title))
                    .collect();
                assert_eq!(containing.len(), 1, "{} in {:?}", b.title, field);
                assert_eq!(containing[0].key, field.key(b));
            }
        }
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let books = vec![
            book("a1", "Book1", "author1", "2020"),
            book("a2", "Book2", "author2", "2020"),
        ];

        assert_eq!(
            group_titles(&books, GroupField::Year),
            group_titles(&books, GroupField::Year)
        );
    }
}
