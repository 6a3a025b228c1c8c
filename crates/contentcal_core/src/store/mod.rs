//! Content store: the in-memory collection and its persisted mirror.
//!
//! # Responsibility
//! - Own the content collection and answer date-keyed lookups.
//! - Mirror the full collection into key-value storage after every insert.
//!
//! # Invariants
//! - The persisted value is a JSON array of every item, in insertion order.
//! - A failed write never rolls back the in-memory collection.
//! - Lookups scan in insertion order; the first match wins.

mod content_store;

pub use content_store::{
    ContentStore, CorruptStatePolicy, StoreError, StoreResult, CORRUPT_BACKUP_SUFFIX,
    DEFAULT_STORAGE_KEY,
};
