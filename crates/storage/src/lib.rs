//! Storage layer for lexset
//!
//! This crate implements the ordered index and the backends behind it:
//! - SortedSet: minimal ordered-set service contract
//! - RedisSortedSet: Redis sorted set over one synchronous connection
//! - MemorySortedSet: BTreeMap-based backend and test double
//! - Retrying: opt-in retry wrapper for any backend
//! - OrderedIndex: composite-key adapter (clear, insert_many, range_query, size)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod ordered;
pub mod redis_set;
pub mod retry;
pub mod sorted_set;

pub use memory::MemorySortedSet;
pub use ordered::{OrderedIndex, DEFAULT_SET_NAME, MEMBER_SCORE};
pub use redis_set::{RedisParams, RedisSortedSet};
pub use retry::Retrying;
pub use sorted_set::SortedSet;
