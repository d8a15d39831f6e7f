//! Contributor identity resolution.
//!
//! The pipeline is:
//! 1. Index metadata records by email, name and GitHub handle
//! 2. Enrich each commit author from the indices (email first, then name)
//! 3. Normalize social handles into canonical profile links

pub mod author;
pub mod index;
pub mod resolver;
pub mod social;

pub use author::parse_author;
pub use index::{IndexKind, Indices};
pub use resolver::{resolve_contributor, resolve_contributors};
