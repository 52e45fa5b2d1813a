//! Opt-in retry wrapper for sorted-set backends
//!
//! Backends and the `OrderedIndex` adapter are fail-fast: one failed round
//! trip ends the operation. Deployments that want to ride out short outages
//! wrap the backend in [`Retrying`] instead of changing adapter behavior.
//!
//! `ZADD` is idempotent on member sets, so re-sending a batch never creates
//! duplicates. If the first attempt was applied before the transport failed,
//! the retried call reports fewer newly added members than were actually new.

use std::thread;
use std::time::Duration;

use tracing::warn;

use lexset_core::LexsetResult;

use crate::sorted_set::SortedSet;

/// Default pause between attempts
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);

/// Sorted-set wrapper that re-issues failed calls
#[derive(Debug)]
pub struct Retrying<S> {
    inner: S,
    retries: u32,
    backoff: Duration,
}

impl<S: SortedSet> Retrying<S> {
    /// Wrap `inner`, re-issuing each failed call up to `retries` extra times
    pub fn new(inner: S, retries: u32) -> Self {
        Self {
            inner,
            retries,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Override the pause between attempts
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// The wrapped backend
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn run<T>(&self, operation: &str, f: impl Fn(&S) -> LexsetResult<T>) -> LexsetResult<T> {
        let mut attempt = 0;
        loop {
            match f(&self.inner) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        target: "lexset::store",
                        operation,
                        attempt,
                        max = self.retries,
                        error = %e,
                        "Store call failed, retrying"
                    );
                    thread::sleep(self.backoff);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl<S: SortedSet> SortedSet for Retrying<S> {
    fn delete(&self, set: &str) -> LexsetResult<()> {
        self.run("DEL", |s| s.delete(set))
    }

    fn add_many(&self, set: &str, score: f64, members: &[&[u8]]) -> LexsetResult<u64> {
        self.run("ZADD", |s| s.add_many(set, score, members))
    }

    fn range_by_lex(&self, set: &str, lower: &[u8], upper: &[u8]) -> LexsetResult<Vec<Vec<u8>>> {
        self.run("ZRANGEBYLEX", |s| s.range_by_lex(set, lower, upper))
    }

    fn exists(&self, set: &str) -> LexsetResult<bool> {
        self.run("EXISTS", |s| s.exists(set))
    }

    fn card(&self, set: &str) -> LexsetResult<u64> {
        self.run("ZCARD", |s| s.card(set))
    }
}
