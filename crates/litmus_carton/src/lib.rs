//! Carton - The shared toolbox for litmus.
//!
//! Like an artist's carton holding the tools every piece of work needs,
//! this crate holds the small utilities shared by every litmus crate.
//!
//! # Modules
//!
//! - **i18n**: Localised lint and CLI messages
//! - **source_range**: Byte offset to line/column mapping

pub mod i18n;
pub mod source_range;

pub use source_range::LineIndex;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};
