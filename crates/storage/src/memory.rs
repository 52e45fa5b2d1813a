//! MemorySortedSet: in-process sorted-set backend
//!
//! Implements the SortedSet trait using:
//! - `BTreeMap<String, BTreeSet<Vec<u8>>>` for named sets of ordered members
//! - `parking_lot::RwLock` for thread-safe access
//!
//! # Design Notes
//!
//! - **Scores are not stored**: every member lexset writes has score 0, so
//!   member order is byte order and a set is all that is needed
//! - **Fault injection**: the store can be switched to unavailable, or told to
//!   fail after a number of successful `add_many` calls, so loader failure
//!   paths are testable without a network service

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use parking_lot::RwLock;

use lexset_core::{LexsetError, LexsetResult};

use crate::sorted_set::SortedSet;

/// In-memory sorted-set backend
#[derive(Debug)]
pub struct MemorySortedSet {
    /// Named sets of members, each ordered by raw bytes
    sets: RwLock<BTreeMap<String, BTreeSet<Vec<u8>>>>,
    /// When false every call fails with StoreUnavailable
    available: AtomicBool,
    /// Remaining successful `add_many` calls before failing; negative = unlimited
    adds_before_failure: AtomicI64,
}

impl Default for MemorySortedSet {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySortedSet {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            sets: RwLock::new(BTreeMap::new()),
            available: AtomicBool::new(true),
            adds_before_failure: AtomicI64::new(-1),
        }
    }

    /// Simulate the service going away (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Allow `n` more successful `add_many` calls, then fail every later one
    pub fn fail_adds_after(&self, n: usize) {
        self.adds_before_failure
            .store(i64::try_from(n).unwrap_or(i64::MAX), Ordering::SeqCst);
    }

    /// Total members across all named sets
    pub fn total_members(&self) -> usize {
        self.sets.read().values().map(BTreeSet::len).sum()
    }

    fn check(&self, operation: &'static str) -> LexsetResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(LexsetError::store_unavailable(operation, "memory store marked unavailable"))
        }
    }

    fn take_add_permit(&self) -> LexsetResult<()> {
        // Negative is unlimited; zero refuses without decrementing
        self.adds_before_failure
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                match remaining {
                    0 => None,
                    r if r > 0 => Some(r - 1),
                    r => Some(r),
                }
            })
            .map(|_| ())
            .map_err(|_| {
                LexsetError::store_unavailable(
                    "ZADD",
                    "injected failure after configured number of batches",
                )
            })
    }
}

impl SortedSet for MemorySortedSet {
    fn delete(&self, set: &str) -> LexsetResult<()> {
        self.check("DEL")?;
        self.sets.write().remove(set);
        Ok(())
    }

    fn add_many(&self, set: &str, _score: f64, members: &[&[u8]]) -> LexsetResult<u64> {
        self.check("ZADD")?;
        self.take_add_permit()?;
        if members.is_empty() {
            return Ok(0);
        }

        let mut sets = self.sets.write();
        let entry = sets.entry(set.to_string()).or_default();
        let added = members
            .iter()
            .filter(|m| entry.insert(m.to_vec()))
            .count();
        Ok(added as u64)
    }

    fn range_by_lex(&self, set: &str, lower: &[u8], upper: &[u8]) -> LexsetResult<Vec<Vec<u8>>> {
        self.check("ZRANGEBYLEX")?;
        // BTreeSet::range panics on inverted bounds; an inverted range is simply empty
        if lower > upper {
            return Ok(Vec::new());
        }

        let sets = self.sets.read();
        let results = match sets.get(set) {
            Some(members) => members
                .range::<[u8], _>((Bound::Included(lower), Bound::Included(upper)))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        Ok(results)
    }

    fn exists(&self, set: &str) -> LexsetResult<bool> {
        self.check("EXISTS")?;
        Ok(self.sets.read().contains_key(set))
    }

    fn card(&self, set: &str) -> LexsetResult<u64> {
        self.check("ZCARD")?;
        Ok(self.sets.read().get(set).map_or(0, |m| m.len() as u64))
    }
}
