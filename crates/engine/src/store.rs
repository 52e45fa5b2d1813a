//! Opening the configured backend
//!
//! Turns a `[store]` section into a ready [`OrderedIndex`]. The backend is
//! chosen at runtime, so the index is built over a boxed trait object.

use tracing::info;

use lexset_core::LexsetResult;
use lexset_storage::{MemorySortedSet, OrderedIndex, RedisSortedSet, Retrying, SortedSet};

use crate::config::{Backend, StoreConfig};

/// Backend selected at runtime
pub type DynSortedSet = Box<dyn SortedSet>;

/// Open the backend named by `config`
///
/// A positive `retries` wraps the backend in [`Retrying`]; zero leaves it
/// fail-fast.
///
/// # Errors
///
/// - `Configuration` for an unknown backend name
/// - `StoreUnavailable` if the Redis server cannot be reached
pub fn open_store(config: &StoreConfig) -> LexsetResult<DynSortedSet> {
    let store: DynSortedSet = match config.backend()? {
        Backend::Redis => {
            let redis = RedisSortedSet::connect(&config.redis_params())?;
            info!(target: "lexset::store", endpoint = redis.endpoint(), "Using Redis backend");
            Box::new(redis)
        }
        Backend::Memory => {
            info!(target: "lexset::store", "Using in-memory backend");
            Box::new(MemorySortedSet::new())
        }
    };

    if config.retries == 0 {
        return Ok(store);
    }
    Ok(Box::new(
        Retrying::new(store, config.retries).with_backoff(config.retry_backoff()),
    ))
}

/// Open the backend and bind the configured set name
pub fn open_index(config: &StoreConfig) -> LexsetResult<OrderedIndex<DynSortedSet>> {
    let store = open_store(config)?;
    Ok(OrderedIndex::with_set_name(store, config.set_name.clone()))
}
