//! Sorted-set service abstraction
//!
//! This trait is the minimal contract lexset needs from an ordered-set
//! service. It mirrors a Redis sorted set restricted to lexicographic use:
//! every member carries the same score, so member order is plain byte order.
//!
//! Implementations must be safe to call from multiple threads (Send + Sync)
//! and use interior locking, the same way `Storage` implementations do.

use std::sync::Arc;

use lexset_core::LexsetResult;

/// Ordered set of byte-string members, grouped under named sets
///
/// All failures of a round trip surface as `LexsetError::StoreUnavailable`.
/// Implementations never retry; see [`crate::Retrying`] for an opt-in wrapper.
pub trait SortedSet: Send + Sync {
    /// Remove the named set entirely (`DEL`)
    fn delete(&self, set: &str) -> LexsetResult<()>;

    /// Add members with a shared score in one round trip (`ZADD`)
    ///
    /// Returns the number of members that were not already present.
    /// Duplicates within `members` are counted once.
    fn add_many(&self, set: &str, score: f64, members: &[&[u8]]) -> LexsetResult<u64>;

    /// Members within `[lower, upper]`, both inclusive, ascending (`ZRANGEBYLEX`)
    ///
    /// Returns an empty vector when nothing matches or the set does not exist.
    fn range_by_lex(&self, set: &str, lower: &[u8], upper: &[u8]) -> LexsetResult<Vec<Vec<u8>>>;

    /// Whether the named set exists (`EXISTS`)
    fn exists(&self, set: &str) -> LexsetResult<bool>;

    /// Number of members in the named set (`ZCARD`)
    fn card(&self, set: &str) -> LexsetResult<u64>;
}

impl<S: SortedSet + ?Sized> SortedSet for Box<S> {
    fn delete(&self, set: &str) -> LexsetResult<()> {
        (**self).delete(set)
    }

    fn add_many(&self, set: &str, score: f64, members: &[&[u8]]) -> LexsetResult<u64> {
        (**self).add_many(set, score, members)
    }

    fn range_by_lex(&self, set: &str, lower: &[u8], upper: &[u8]) -> LexsetResult<Vec<Vec<u8>>> {
        (**self).range_by_lex(set, lower, upper)
    }

    fn exists(&self, set: &str) -> LexsetResult<bool> {
        (**self).exists(set)
    }

    fn card(&self, set: &str) -> LexsetResult<u64> {
        (**self).card(set)
    }
}

impl<S: SortedSet + ?Sized> SortedSet for Arc<S> {
    fn delete(&self, set: &str) -> LexsetResult<()> {
        (**self).delete(set)
    }

    fn add_many(&self, set: &str, score: f64, members: &[&[u8]]) -> LexsetResult<u64> {
        (**self).add_many(set, score, members)
    }

    fn range_by_lex(&self, set: &str, lower: &[u8], upper: &[u8]) -> LexsetResult<Vec<Vec<u8>>> {
        (**self).range_by_lex(set, lower, upper)
    }

    fn exists(&self, set: &str) -> LexsetResult<bool> {
        (**self).exists(set)
    }

    fn card(&self, set: &str) -> LexsetResult<u64> {
        (**self).card(set)
    }
}
