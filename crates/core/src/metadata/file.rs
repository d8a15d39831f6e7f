//! File-backed contributor metadata.
//!
//! Supported formats:
//!
//! ```json
//! [{ "name": "Jane Doe", "email": "jane@example.com", "github": "janedoe" }]
//! ```
//!
//! or an object with a `contributors` (or `default`) array, and in TOML:
//!
//! ```toml
//! contributors = [
//!   "John Roe <john@example.com>",
//!   { name = "Jane Doe", email = "jane@example.com", mastodon = "@jane@example.social" },
//! ]
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::MetadataProvider;
use crate::errors::MetadataError;
use crate::models::MetadataEntry;

/// File names tried when the specifier points at a directory.
const DIRECTORY_CANDIDATES: &[&str] = &["contributors.toml", "contributors.json"];

/// Extensions tried when the specifier has none and does not exist as-is.
const EXTENSIONS: &[&str] = &["toml", "json"];

/// Loads the metadata list from a JSON or TOML file.
#[derive(Debug, Clone)]
pub struct FileProvider {
    specifier: String,
    bases: Vec<PathBuf>,
}

impl FileProvider {
    /// Resolve `specifier` against `cwd`, then the process working directory.
    pub fn new(specifier: impl Into<String>, cwd: &Path) -> Self {
        let mut bases = vec![cwd.to_path_buf()];
        if let Ok(process_cwd) = std::env::current_dir() {
            if process_cwd != cwd {
                bases.push(process_cwd);
            }
        }
        Self {
            specifier: specifier.into(),
            bases,
        }
    }

    /// Find the file this provider reads from.
    pub fn resolve(&self) -> Result<PathBuf, MetadataError> {
        for base in &self.bases {
            let candidate = base.join(&self.specifier);
            if let Some(found) = probe(&candidate) {
                debug!(path = %found.display(), "resolved contributors module");
                return Ok(found);
            }
        }

        Err(MetadataError::NotFound {
            specifier: self.specifier.clone(),
            searched: self
                .bases
                .iter()
                .map(|b| b.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

fn probe(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }
    if candidate.is_dir() {
        return DIRECTORY_CANDIDATES
            .iter()
            .map(|name| candidate.join(name))
            .find(|path| path.is_file());
    }
    if candidate.extension().is_none() {
        return EXTENSIONS
            .iter()
            .map(|ext| candidate.with_extension(ext))
            .find(|path| path.is_file());
    }
    None
}

impl MetadataProvider for FileProvider {
    fn load(&self) -> Result<Vec<MetadataEntry>, MetadataError> {
        let path = self.resolve()?;
        info!(path = %path.display(), "loading contributors module");

        let contents = std::fs::read_to_string(&path)?;
        let parse_error = |detail: String| MetadataError::Parse {
            path: path.display().to_string(),
            detail,
        };

        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let exported: serde_json::Value = if is_toml {
            let table: toml::Value =
                toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?;
            serde_json::to_value(table).map_err(|e| parse_error(e.to_string()))?
        } else {
            serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
        };

        let list = exported_list(exported)?;
        let entries: Vec<MetadataEntry> =
            serde_json::from_value(list).map_err(|e| parse_error(e.to_string()))?;
        debug!(count = entries.len(), "loaded contributor metadata");
        Ok(entries)
    }
}

/// Accept a bare array, or an object with a `contributors` or `default`
/// array.
fn exported_list(exported: serde_json::Value) -> Result<serde_json::Value, MetadataError> {
    match exported {
        serde_json::Value::Array(_) => Ok(exported),
        serde_json::Value::Object(mut fields) => ["contributors", "default"]
            .iter()
            .find_map(|key| fields.remove(*key).filter(serde_json::Value::is_array))
            .ok_or(MetadataError::NotAnArray),
        _ => Err(MetadataError::NotAnArray),
    }
}
