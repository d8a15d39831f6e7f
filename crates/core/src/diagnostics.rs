//! Non-fatal messages collected while processing a document.
//!
//! Data-quality problems never abort a run. They are recorded here so the
//! caller can surface them next to the processed file, and mirrored to
//! `tracing` as they happen.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

/// Source label attached to every diagnostic.
pub const SOURCE: &str = "git-contributors";

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Stable rule identifiers for every diagnostic the engine can emit.
pub mod rules {
    pub const NO_COMMITS: &str = "no-commits";
    pub const REQUIRE_GIT_EMAIL: &str = "require-git-email";
    pub const VALID_TWITTER: &str = "valid-twitter";
    pub const VALID_MASTODON: &str = "valid-mastodon";
    pub const SOCIAL: &str = "social";
}

/// A single recorded message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub rule_id: &'static str,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}:{}]",
            self.severity, self.message, SOURCE, self.rule_id
        )
    }
}

/// Append-only message sink shared by all stages of one run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, rule_id: &'static str, message: impl Into<String>) {
        let message = message.into();
        warn!(rule = rule_id, "{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            rule_id,
            message,
        });
    }

    /// Record an informational message.
    pub fn info(&mut self, rule_id: &'static str, message: impl Into<String>) {
        let message = message.into();
        info!(rule = rule_id, "{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Info,
            rule_id,
            message,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any diagnostic was recorded under `rule_id`.
    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.entries.iter().any(|d| d.rule_id == rule_id)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
