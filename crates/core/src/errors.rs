//! Error types for the git-contributors core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them all for callers that want a
//! single error type.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// The commit source failed for a reason other than an empty history.
    #[error("could not get Git contributors: {0}")]
    GitContributors(#[source] GitError),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue { field: String, detail: String },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Metadata errors
// ---------------------------------------------------------------------------

/// Errors from loading the contributor metadata list.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The metadata file could not be resolved from any base directory.
    #[error("cannot find contributors module '{specifier}' (searched: {searched})")]
    NotFound { specifier: String, searched: String },

    /// The metadata file exists but could not be parsed.
    #[error("cannot parse contributors module '{path}': {detail}")]
    Parse { path: String, detail: String },

    /// The setting did not produce a list.
    #[error("the contributors setting must be, or resolve to, an array")]
    NotAnArray,

    /// Generic I/O error.
    #[error("contributors module I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Manifest errors
// ---------------------------------------------------------------------------

/// Errors from reading a project manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest exists but is malformed.
    #[error("cannot parse manifest '{path}': {detail}")]
    Parse { path: String, detail: String },

    /// Generic I/O error.
    #[error("manifest I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Git errors
// ---------------------------------------------------------------------------

/// Errors from the commit source.
#[derive(Debug, Error)]
pub enum GitError {
    /// The path does not exist or is not inside a git repository.
    #[error("git repository not found at '{0}'")]
    RepositoryNotFound(String),

    /// HEAD is unborn: the repository has no history to read.
    #[error("repository at '{0}' does not have any commits yet")]
    NoCommits(String),

    /// A `git2` library error.
    #[error("git2 error: {0}")]
    Git2Error(#[from] git2::Error),
}

impl GitError {
    /// Whether this failure only means the history is empty.
    pub fn is_empty_history(&self) -> bool {
        self.to_string().contains("does not have any commits yet")
    }
}

// ---------------------------------------------------------------------------
// Render errors
// ---------------------------------------------------------------------------

/// Errors from writing the contributors table into a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Nothing left to render after filtering.
    #[error("no contributors found")]
    NoContributors,

    /// The document has no contributors heading and appending is disabled.
    #[error("no heading matching 'contributors' found in document")]
    MissingHeading,
}
