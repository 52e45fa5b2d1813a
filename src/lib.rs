//! lexset - case-insensitive prefix search over a sorted-set index
//!
//! Every entry is stored as one member of a lexicographically ordered set,
//! keyed by its case-folded form and carrying the original string. A search
//! is a single range query over that set.
//!
//! # Quick Start
//!
//! ```
//! use lexset::{encode, MemorySortedSet, OrderedIndex, QueryEngine};
//!
//! let index = OrderedIndex::new(MemorySortedSet::new());
//! index.insert_many(&[encode("Apple").unwrap(), encode("banana").unwrap()]).unwrap();
//!
//! let engine = QueryEngine::new(&index);
//! assert_eq!(engine.search("APP").unwrap(), vec!["Apple"]);
//! assert_eq!(engine.count().unwrap(), 2);
//! ```
//!
//! # Architecture
//!
//! - `lexset-core`: key codec, limits, errors
//! - `lexset-storage`: the sorted-set contract, Redis and in-memory backends
//! - `lexset-engine`: config, corpus loading, querying
//!
//! This crate re-exports the engine's public API.

pub use lexset_engine::*;
