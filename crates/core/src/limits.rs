//! Size limits for indexed entries
//!
//! The sorted-set service accepts very large members, but a single corpus
//! line of megabytes is almost always a malformed file. Limits are enforced
//! by the key codec at encode time.

use crate::key::KeyError;

/// Default maximum byte length of an original entry (64 KiB)
pub const DEFAULT_MAX_ENTRY_BYTES: usize = 64 * 1024;

/// Size limits for entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum original entry length in bytes (default: 64 KiB)
    pub max_entry_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits {
            max_entry_bytes: 16,
        }
    }

    /// Validate an entry length
    ///
    /// Only the original string is measured; the escaped normalized half
    /// of the composite key is derived from it.
    pub fn validate_entry_length(&self, original: &str) -> Result<(), KeyError> {
        let len = original.len();
        if len > self.max_entry_bytes {
            return Err(KeyError::TooLong {
                actual: len,
                max: self.max_entry_bytes,
            });
        }
        Ok(())
    }
}
