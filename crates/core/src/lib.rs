//! git-contributors core library.
//!
//! This crate fills the "Contributors" section of a markdown document from
//! Git history: it indexes supplemental identity metadata, enriches commit
//! authors with it, merges records that belong to the same person, ranks
//! them by commit count, and renders the table.

pub mod config;
pub mod contributors;
pub mod diagnostics;
pub mod errors;
pub mod git;
pub mod identity;
pub mod manifest;
pub mod metadata;
pub mod models;
pub mod render;
pub mod transform;

// Re-exports for convenience.
pub use config::ContributorsConfig;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use errors::CoreError;
pub use identity::Indices;
pub use transform::{ContributorsTransform, TransformOutcome};
