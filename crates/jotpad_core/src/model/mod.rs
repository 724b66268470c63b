//! Domain model for note entries.
//!
//! # Invariants
//! - An entry's `id` is assigned by the store exactly once and never changes.
//! - Title and body are free-form text with no length or uniqueness rules.

pub mod entry;
