//! Commit history access.

pub mod source;

pub use source::{CommitSource, GitCommitSource};
