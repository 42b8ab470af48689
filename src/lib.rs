// ============================================================================
// Bookstore Library
// ============================================================================

pub mod aggregate;
pub mod config;
pub mod core;
pub mod seed;
pub mod storage;
pub mod web;

pub use aggregate::{AuthorGroup, Group, GroupField, YearGroup, group_titles};
pub use crate::core::{Book, BookFilter, BookUpdate, Result, StoreError};
pub use storage::{DocumentStore, InMemoryStore, SnapshotStore};
pub use web::{AppState, build_router};
