//! Carton - The caster's toolbox for Moulage.
//!
//! This crate provides the foundational utilities shared by the Moulage macro engine,
//! much like a carton holds the tools a caster needs before pouring a mold.
//!
//! # Modules
//!
//! - **Source edits**: a span-based edit buffer for source-to-source rewrites
//! - **Line index**: byte offset to line/column lookup for diagnostics
//!
//! # Example
//!
//! ```
//! use moulage_carton::{Fragment, SourceEdits};
//!
//! let source = "wrap({ a: 1 })";
//! let mut edits = SourceEdits::new(source);
//! edits.remove(0, 5);
//! edits.remove(13, 14);
//! edits.prepend(7, "b: 2, ");
//! assert_eq!(edits.render(), "{ b: 2, a: 1 }");
//! # let _ = Fragment::new();
//! ```

pub mod line_index;
pub mod source_edit;

pub use line_index::{LineColumn, LineIndex};
pub use source_edit::{Fragment, Piece, SourceEdits};

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};
