//! Query engine: the read path
//!
//! A search is one range query. The term is trimmed and lowercased, turned
//! into an inclusive prefix range over the normalized half of each key, and
//! every key in that range is decoded back to its original string. Results
//! come back in ascending key order, which is normalized-string order with
//! ties broken by the original's bytes.

use tracing::{debug, warn};

use lexset_core::{prefix_range, LexsetResult};
use lexset_storage::{OrderedIndex, SortedSet};

/// Read-only view over an index
#[derive(Debug)]
pub struct QueryEngine<'a, S> {
    index: &'a OrderedIndex<S>,
}

impl<'a, S: SortedSet> QueryEngine<'a, S> {
    /// Query `index`
    pub fn new(index: &'a OrderedIndex<S>) -> Self {
        Self { index }
    }

    /// Original strings whose normalized form starts with the normalized term
    ///
    /// An empty (or all-whitespace) term matches every entry. Keys that do not
    /// decode are skipped with a warning, so a foreign member in the set
    /// cannot fail a search.
    pub fn search(&self, term: &str) -> LexsetResult<Vec<String>> {
        let range = prefix_range(term);
        let keys = self.index.prefix_query(&range)?;

        let mut results = Vec::with_capacity(keys.len());
        for key in &keys {
            match key.original() {
                Ok(original) => results.push(original),
                Err(e) => warn!(
                    target: "lexset::query",
                    key = ?key,
                    reason = e.reason_code(),
                    "Skipping undecodable key"
                ),
            }
        }
        debug!(target: "lexset::query", term, found = results.len(), "Search complete");
        Ok(results)
    }

    /// Number of entries in the index
    pub fn count(&self) -> LexsetResult<u64> {
        self.index.size()
    }
}
