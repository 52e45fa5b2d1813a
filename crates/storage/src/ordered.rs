//! OrderedIndex: the prefix index on top of a sorted-set backend
//!
//! The adapter binds one named set and speaks in composite keys. It adds no
//! resilience of its own: every call is exactly one round trip, and a
//! transport failure is returned as `StoreUnavailable` with nothing retried.
//! After a failed `insert_many` the caller cannot assume any subset of the
//! batch was applied.

use tracing::trace;

use lexset_core::{CompositeKey, LexsetResult, PrefixRange};

use crate::sorted_set::SortedSet;

/// Set name used when none is configured
pub const DEFAULT_SET_NAME: &str = "string_search_zset";

/// Score stored with every member
///
/// Lexicographic range queries are only well defined when all members share
/// one score.
pub const MEMBER_SCORE: f64 = 0.0;

/// Ordered set of composite keys stored under one name
#[derive(Debug)]
pub struct OrderedIndex<S> {
    store: S,
    set_name: String,
}

impl<S: SortedSet> OrderedIndex<S> {
    /// Bind the default set name
    pub fn new(store: S) -> Self {
        Self::with_set_name(store, DEFAULT_SET_NAME)
    }

    /// Bind a specific set name
    pub fn with_set_name(store: S, set_name: impl Into<String>) -> Self {
        Self {
            store,
            set_name: set_name.into(),
        }
    }

    /// Name of the bound set
    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    /// The underlying backend
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Remove every entry
    ///
    /// Irreversible. Clearing an index that was never built succeeds.
    pub fn clear(&self) -> LexsetResult<()> {
        trace!(target: "lexset::store", set = %self.set_name, "DEL");
        self.store.delete(&self.set_name)
    }

    /// Insert a batch of keys in one round trip
    ///
    /// Returns how many keys were newly added. Keys already present, and
    /// repeats within the batch, are not counted. An empty batch makes no
    /// round trip.
    pub fn insert_many(&self, keys: &[CompositeKey]) -> LexsetResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let members: Vec<&[u8]> = keys.iter().map(CompositeKey::as_bytes).collect();
        trace!(target: "lexset::store", set = %self.set_name, batch = members.len(), "ZADD");
        self.store.add_many(&self.set_name, MEMBER_SCORE, &members)
    }

    /// Keys within `[lower, upper]`, both inclusive, in ascending byte order
    pub fn range_query(&self, lower: &[u8], upper: &[u8]) -> LexsetResult<Vec<CompositeKey>> {
        trace!(target: "lexset::store", set = %self.set_name, "ZRANGEBYLEX");
        let members = self.store.range_by_lex(&self.set_name, lower, upper)?;
        Ok(members.into_iter().map(CompositeKey::from_bytes).collect())
    }

    /// Keys inside a prefix range
    pub fn prefix_query(&self, range: &PrefixRange) -> LexsetResult<Vec<CompositeKey>> {
        self.range_query(&range.lower, &range.upper)
    }

    /// Current number of entries; 0 if the set was never created
    pub fn size(&self) -> LexsetResult<u64> {
        if !self.store.exists(&self.set_name)? {
            return Ok(0);
        }
        self.store.card(&self.set_name)
    }
}
