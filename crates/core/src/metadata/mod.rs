//! Sources of supplemental contributor metadata.
//!
//! The `contributors` setting is either an inline list or a path to a file
//! holding the list. Both are exposed through [`MetadataProvider`] so the
//! transform does not care where the records came from.

pub mod file;

use std::path::Path;

use tracing::warn;

use crate::config::ContributorsSetting;
use crate::errors::MetadataError;
use crate::models::MetadataEntry;

pub use file::FileProvider;

/// Something that can produce the list of metadata entries to index.
pub trait MetadataProvider: Send + Sync {
    fn load(&self) -> Result<Vec<MetadataEntry>, MetadataError>;
}

/// Metadata given directly in configuration.
#[derive(Debug, Clone, Default)]
pub struct InlineProvider {
    entries: Vec<MetadataEntry>,
}

impl InlineProvider {
    pub fn new(entries: Vec<MetadataEntry>) -> Self {
        Self { entries }
    }
}

impl MetadataProvider for InlineProvider {
    fn load(&self) -> Result<Vec<MetadataEntry>, MetadataError> {
        Ok(self.entries.clone())
    }
}

/// A `contributors` setting that is neither a list nor a file path.
#[derive(Debug, Clone)]
pub struct RejectedProvider;

impl MetadataProvider for RejectedProvider {
    fn load(&self) -> Result<Vec<MetadataEntry>, MetadataError> {
        Err(MetadataError::NotAnArray)
    }
}

/// Pick the provider for a `contributors` setting. No setting means no
/// extra metadata.
pub fn provider_for(setting: Option<&ContributorsSetting>, cwd: &Path) -> Box<dyn MetadataProvider> {
    match setting {
        None => Box::new(InlineProvider::default()),
        Some(ContributorsSetting::Inline(entries)) => Box::new(InlineProvider::new(entries.clone())),
        Some(ContributorsSetting::Module(specifier)) => {
            Box::new(FileProvider::new(specifier.clone(), cwd))
        }
        Some(ContributorsSetting::Other(value)) => {
            warn!(%value, "contributors setting is not a list or a path");
            Box::new(RejectedProvider)
        }
    }
}
