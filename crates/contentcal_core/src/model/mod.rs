//! Content calendar domain model.
//!
//! # Responsibility
//! - Define the canonical content record persisted by the store.
//! - Define day-granularity matching used by every date lookup.
//!
//! # Invariants
//! - A content item belongs to exactly one calendar day.
//! - Time-of-day never participates in date matching.

pub mod content_item;
