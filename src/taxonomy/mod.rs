//! Taxonomy Layer - the ESCO competency vocabulary
//!
//! An immutable snapshot of the external skill catalog:
//! - `catalog`: entry type + JSON catalog file loading
//! - `normalize`: the deterministic tokenizer shared by index and matcher
//! - `index`: inverted token/phrase index, read-only after build
//!
//! Re-initialization builds a fresh index and swaps it in at the holder;
//! an index is never mutated in place.

pub mod catalog;
pub mod index;
pub mod normalize;

pub use catalog::{TaxonomyEntry, load_catalog};
pub use index::TaxonomyIndex;
