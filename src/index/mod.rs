//! Vector index module
//!
//! The retrieval core of the tool: a flat, exact nearest-neighbor index over
//! parallel (vector, text, metadata) sequences, plus its single-file
//! persistence. The parallel sequences being equal length and index-aligned
//! is the invariant everything else here leans on; it is enforced on build
//! and re-checked on load.

mod error;
mod persistence;
mod store;

pub use error::IndexError;
pub use persistence::{load_index, save_index};
pub use store::{SearchHit, VectorIndex};
