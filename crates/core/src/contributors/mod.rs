//! Consolidation and ordering of resolved contributors.

pub mod dedup;
pub mod rank;

pub use dedup::dedup;
pub use rank::{rank, Columns};
