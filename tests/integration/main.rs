//! Integration Tests
//!
//! Load a corpus from disk into an in-memory index and query it back:
//! - Load/search: filtering, case folding, ordering
//! - Archives: zip sources behave like plain text
//! - Reloads: idempotence, drop-and-reload, partial failure

#[path = "../common/mod.rs"]
mod common;

mod archives;
mod load_search;
mod reloads;
