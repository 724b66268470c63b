//! Persistence store contracts and the SQLite implementation.
//!
//! # Invariants
//! - Only the store worker thread ever holds a repository.
//! - Write paths report affected row counts; zero is a valid outcome here
//!   and is never turned into an error.

pub mod entry_repo;
