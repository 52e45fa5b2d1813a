//! Engine for lexset
//!
//! This crate wires the codec and the storage layer into the two paths a
//! user sees:
//! - Configuration: `lexset.toml` parsing and defaults
//! - Loading: discovery, archive expansion, filtering, batched inserts
//! - Querying: case-insensitive prefix search and index size
//! - Store opening: backend selection from config
//!
//! The engine is the only component that knows about files on disk.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod config;
pub mod discovery;
pub mod loader;
pub mod query;
pub mod store;

pub use config::{Backend, DataConfig, LexsetConfig, StoreConfig, CONFIG_FILE_NAME};
pub use loader::{CorpusLoader, FileReport, LoadOptions, LoadReport, DEFAULT_BATCH_SIZE};
pub use query::QueryEngine;
pub use store::{open_index, open_store, DynSortedSet};

pub use lexset_core::{
    decode, encode, normalize, prefix_range, CompositeKey, ErrorKind, LexsetError, LexsetResult, Limits,
    PrefixRange,
};
pub use lexset_storage::{MemorySortedSet, OrderedIndex, RedisParams, RedisSortedSet, SortedSet};
