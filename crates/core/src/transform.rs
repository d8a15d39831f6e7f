//! The document transform: metadata, history, identity engine, renderer.
//!
//! Stages run in sequence and any fatal error aborts the whole transform
//! before the document is touched:
//! 1. Skip early when there is no section to fill and appending is off
//! 2. Load configured metadata and the nearest manifest into [`Indices`]
//! 3. Read commit authorship (on a blocking thread)
//! 4. Resolve, deduplicate and rank contributors
//! 5. Render the table into the document

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::ContributorsConfig;
use crate::contributors::{dedup, rank, Columns};
use crate::diagnostics::{rules, Diagnostic, Diagnostics};
use crate::errors::CoreError;
use crate::git::{CommitSource, GitCommitSource};
use crate::identity::{resolve_contributors, Indices};
use crate::manifest::load_manifest;
use crate::metadata::provider_for;
use crate::models::{RawCommitContributor, ResolvedContributor};
use crate::render;

/// Result of running the transform over one document.
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    /// The new document, or `None` when it is left unchanged.
    pub document: Option<String>,
    /// The contributors that were rendered.
    pub contributors: Vec<ResolvedContributor>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TransformOutcome {
    fn unchanged(diagnostics: Diagnostics) -> Self {
        Self {
            document: None,
            contributors: Vec::new(),
            diagnostics: diagnostics.into_vec(),
        }
    }
}

/// Resolve, deduplicate and rank commit authors. Pure and synchronous.
pub fn consolidate(
    raw: &[RawCommitContributor],
    indices: &mut Indices,
    limit: usize,
    sink: &mut Diagnostics,
) -> Vec<ResolvedContributor> {
    let resolved = resolve_contributors(raw, indices, sink);
    let unique = dedup(resolved);
    rank(unique, limit)
}

/// Fills the Contributors section of markdown documents.
pub struct ContributorsTransform {
    config: ContributorsConfig,
    source: Arc<dyn CommitSource>,
}

impl ContributorsTransform {
    /// Create a transform reading history with libgit2.
    pub fn new(config: ContributorsConfig) -> Self {
        let source = Arc::new(GitCommitSource::new(config.mailmap));
        Self { config, source }
    }

    /// Create a transform with a custom commit source.
    pub fn with_source(config: ContributorsConfig, source: Arc<dyn CommitSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &ContributorsConfig {
        &self.config
    }

    /// Absolute working directory: the configured `cwd`, resolved against
    /// the process working directory.
    fn cwd(&self) -> Result<PathBuf, CoreError> {
        let process_cwd = std::env::current_dir().map_err(crate::errors::ConfigError::IoError)?;
        Ok(match &self.config.cwd {
            Some(cwd) if cwd.is_absolute() => cwd.clone(),
            Some(cwd) => process_cwd.join(cwd),
            None => process_cwd,
        })
    }

    /// Collect the ranked contributors for a file.
    ///
    /// Returns `Ok(None)` when the repository has no commits yet; that is
    /// reported to `sink` and is not an error.
    #[instrument(skip_all, fields(file = %file_path.display()))]
    pub async fn contributors(
        &self,
        file_path: &Path,
        sink: &mut Diagnostics,
    ) -> Result<Option<Vec<ResolvedContributor>>, CoreError> {
        let cwd = self.cwd()?;
        let base = match file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => cwd.join(parent),
            _ => cwd.clone(),
        };

        let entries = provider_for(self.config.contributors.as_ref(), &cwd).load()?;
        let mut indices = Indices::from_entries(&entries);

        let manifest = load_manifest(&base)?;
        for entry in manifest.entries() {
            indices.index_entry(entry);
        }
        debug!(keys = indices.len(), "metadata indexed");

        let source = Arc::clone(&self.source);
        let dir = cwd.clone();
        let listed = tokio::task::spawn_blocking(move || source.list(&dir))
            .await
            .map_err(|e| CoreError::Task(e.to_string()))?;

        let raw = match listed {
            Ok(raw) => raw,
            Err(e) if e.is_empty_history() => {
                sink.info(
                    rules::NO_COMMITS,
                    "could not get Git contributors as there are no commits yet",
                );
                return Ok(None);
            }
            Err(e) => return Err(CoreError::GitContributors(e)),
        };

        let ranked = consolidate(&raw, &mut indices, self.config.limit, sink);
        info!(
            authors = raw.len(),
            contributors = ranked.len(),
            "contributors consolidated"
        );
        Ok(Some(ranked))
    }

    /// Run the transform over `document`, the contents of `file_path`.
    pub async fn run(&self, document: &str, file_path: &Path) -> Result<TransformOutcome, CoreError> {
        let mut sink = Diagnostics::new();

        if !self.config.append_if_missing && !render::has_contributors_heading(document) {
            debug!(file = %file_path.display(), "no contributors heading, skipping");
            return Ok(TransformOutcome::unchanged(sink));
        }

        let Some(contributors) = self.contributors(file_path, &mut sink).await? else {
            return Ok(TransformOutcome::unchanged(sink));
        };

        let columns = Columns::for_contributors(&contributors);
        let rendered = render::inject(
            document,
            &contributors,
            columns,
            self.config.append_if_missing,
        )?;

        Ok(TransformOutcome {
            document: (rendered != document).then_some(rendered),
            contributors,
            diagnostics: sink.into_vec(),
        })
    }
}
