//! Composite key codec
//!
//! A sorted set only knows how to order byte strings and answer
//! lexicographic range queries. To turn it into a case-insensitive prefix
//! index each entry is stored as a single composite member:
//!
//! ```text
//! escape(lowercase(original)) ':' original
//! ```
//!
//! ## Contract
//!
//! - Ordering is by escaped normalized form first, then by the untouched
//!   original bytes. Escaping preserves normalized order with one exception:
//!   `:` is stored as `\:` (0x5C), so at the same position it sorts after the
//!   bytes 0x3B..=0x5B (`;` through `[`) instead of before them, e.g. `a;`
//!   sorts before `a:`. Prefix matching is unaffected.
//! - Two originals that differ only in case produce two distinct members.
//! - The same original always produces the same member, so re-inserting it is a no-op.
//! - In the normalized half `\` is written `\\` and `:` is written `\:`.
//!   The original half is the tail of the key and is never escaped.
//! - A prefix range `[q, q 0xFF]` over escaped `q` contains exactly the members
//!   whose normalized form starts with `q`.
//!
//! Escaping is a per-byte substitution on ASCII bytes, which never occur inside
//! multi-byte UTF-8 sequences, so `escape(a + b) == escape(a) + escape(b)` and
//! prefix tests on escaped forms agree with prefix tests on raw forms.

use std::fmt;

use thiserror::Error;

use crate::limits::Limits;

/// Byte separating the normalized half from the original half
pub const SEPARATOR: u8 = b':';

/// Escape byte used inside the normalized half
pub const ESCAPE: u8 = b'\\';

/// Upper-bound sentinel; never appears in UTF-8 text
pub const MAX_BYTE: u8 = 0xFF;

/// Case-fold a string for ordering and matching
///
/// Unicode-aware; the result may differ in byte length from the input
/// (e.g. `'İ'` lowercases to two code points).
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
}

fn push_escaped(out: &mut Vec<u8>, normalized: &str) {
    for &b in normalized.as_bytes() {
        if b == SEPARATOR || b == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(b);
    }
}

/// Sortable member stored in the index
///
/// Ordered by raw bytes, which is also the order the sorted-set service
/// returns members in.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeKey(Vec<u8>);

impl CompositeKey {
    /// Wrap raw bytes read back from the store
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        CompositeKey(bytes)
    }

    /// Borrow the encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Recover the original string
    pub fn original(&self) -> Result<String, KeyError> {
        decode(&self.0)
    }
}

impl fmt::Debug for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeKey({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl From<Vec<u8>> for CompositeKey {
    fn from(bytes: Vec<u8>) -> Self {
        CompositeKey(bytes)
    }
}

impl AsRef<[u8]> for CompositeKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A single indexed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The string as it appeared in source data
    pub original: String,
    /// Case-folded form, used only for ordering and matching
    pub normalized: String,
    /// Encoded member
    pub key: CompositeKey,
}

impl Entry {
    /// Build an entry, enforcing the given limits
    pub fn new(original: &str, limits: &Limits) -> Result<Self, KeyError> {
        if original.is_empty() {
            return Err(KeyError::Empty);
        }
        limits.validate_entry_length(original)?;

        let normalized = normalize(original);
        let mut bytes = Vec::with_capacity(normalized.len() + 1 + original.len());
        push_escaped(&mut bytes, &normalized);
        bytes.push(SEPARATOR);
        bytes.extend_from_slice(original.as_bytes());

        Ok(Entry {
            original: original.to_string(),
            normalized,
            key: CompositeKey(bytes),
        })
    }
}

/// Encode an original string using default limits
///
/// # Examples
///
/// ```
/// use lexset_core::key::{decode, encode};
///
/// let key = encode("Apple").unwrap();
/// assert_eq!(key.as_bytes(), b"apple:Apple");
/// assert_eq!(decode(key.as_bytes()).unwrap(), "Apple");
/// ```
pub fn encode(original: &str) -> Result<CompositeKey, KeyError> {
    encode_with_limits(original, &Limits::default())
}

/// Encode an original string with custom limits
pub fn encode_with_limits(original: &str, limits: &Limits) -> Result<CompositeKey, KeyError> {
    Entry::new(original, limits).map(|entry| entry.key)
}

/// Decode a stored member back to its original string
///
/// Splits on the first separator that is not escaped and returns
/// everything after it.
pub fn decode(key: &[u8]) -> Result<String, KeyError> {
    let mut i = 0;
    while i < key.len() {
        match key[i] {
            ESCAPE => i += 2,
            SEPARATOR => {
                return String::from_utf8(key[i + 1..].to_vec()).map_err(|_| KeyError::NotUtf8 {
                    key: String::from_utf8_lossy(key).into_owned(),
                });
            }
            _ => i += 1,
        }
    }
    Err(KeyError::MissingSeparator {
        key: String::from_utf8_lossy(key).into_owned(),
    })
}

/// Inclusive lexicographic range covering one normalized prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRange {
    /// Inclusive lower bound: the escaped normalized term
    pub lower: Vec<u8>,
    /// Inclusive upper bound: the lower bound followed by `0xFF`
    pub upper: Vec<u8>,
}

impl PrefixRange {
    /// Check whether a member falls inside this range
    pub fn contains(&self, member: &[u8]) -> bool {
        member >= self.lower.as_slice() && member <= self.upper.as_slice()
    }
}

/// Compute the prefix range for a search term
///
/// The term is trimmed and case-folded first, so `"APP"`, `" app "` and
/// `"app"` produce the same range. An empty term yields a range covering
/// every member.
pub fn prefix_range(term: &str) -> PrefixRange {
    let normalized = normalize(term.trim());
    let mut lower = Vec::with_capacity(normalized.len() + 1);
    push_escaped(&mut lower, &normalized);
    let mut upper = lower.clone();
    upper.push(MAX_BYTE);
    PrefixRange { lower, upper }
}

/// Key codec errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Original string is empty
    #[error("Entry cannot be empty")]
    Empty,

    /// Original string exceeds the configured maximum
    #[error("Entry too long: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Actual entry length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Stored member has no unescaped separator
    #[error("Stored key {key:?} has no separator")]
    MissingSeparator {
        /// Lossy rendering of the member
        key: String,
    },

    /// Original half of a stored member is not valid UTF-8
    #[error("Stored key {key:?} is not valid UTF-8")]
    NotUtf8 {
        /// Lossy rendering of the member
        key: String,
    },
}

impl KeyError {
    /// Short machine-readable reason code
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::Empty => "empty_entry",
            KeyError::TooLong { .. } => "entry_too_long",
            KeyError::MissingSeparator { .. } => "missing_separator",
            KeyError::NotUtf8 { .. } => "not_utf8",
        }
    }
}
