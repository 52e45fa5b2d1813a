//! Core types for lexset
//!
//! This crate defines the foundational pieces shared by every layer:
//! - CompositeKey / Entry: sortable members and the codec that builds them
//! - PrefixRange: inclusive lexicographic bounds for a search term
//! - Limits: entry size limits enforced at encode time
//! - LexsetError: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod limits;

pub use error::{ErrorKind, LexsetError, LexsetResult};
pub use key::{
    decode, encode, encode_with_limits, normalize, prefix_range, CompositeKey, Entry, KeyError,
    PrefixRange,
};
pub use limits::Limits;
