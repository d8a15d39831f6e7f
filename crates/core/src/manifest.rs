//! Discovery of the nearest project manifest and its author metadata.
//!
//! `package.json` contributes its `author` and `contributors` fields;
//! `Cargo.toml` contributes `[package].authors`. At each directory level
//! `package.json` is preferred.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::ManifestError;
use crate::models::MetadataEntry;

/// Manifest file names, in order of preference within one directory.
pub const MANIFEST_NAMES: &[&str] = &["package.json", "Cargo.toml"];

/// Author metadata read from a manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    /// Where the manifest was found; `None` when there is none.
    pub path: Option<PathBuf>,
    pub author: Option<MetadataEntry>,
    pub contributors: Vec<MetadataEntry>,
}

impl Manifest {
    /// All entries to index: the author first, then the contributors.
    pub fn entries(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.author.iter().chain(self.contributors.iter())
    }
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    author: Option<serde_json::Value>,
    #[serde(default)]
    contributors: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CargoToml {
    #[serde(default)]
    package: Option<CargoPackage>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    #[serde(default)]
    authors: Option<toml::Value>,
}

/// Walk up from `start` and return the first manifest found.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        for name in MANIFEST_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found manifest");
                return Some(candidate);
            }
        }
    }
    None
}

/// Find and read the nearest manifest above `start`.
///
/// A missing manifest is not an error and yields an empty [`Manifest`].
pub fn load_manifest(start: &Path) -> Result<Manifest, ManifestError> {
    match find_manifest(start) {
        Some(path) => read_manifest(&path),
        None => {
            debug!(start = %start.display(), "no manifest found");
            Ok(Manifest::default())
        }
    }
}

/// Read author metadata from a specific manifest file.
pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    info!(path = %path.display(), "reading manifest");
    let contents = std::fs::read_to_string(path)?;
    let parse_error = |detail: String| ManifestError::Parse {
        path: path.display().to_string(),
        detail,
    };

    let is_cargo = path.file_name().is_some_and(|name| name == "Cargo.toml");
    let mut manifest = if is_cargo {
        let data: CargoToml = toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?;
        let authors = data
            .package
            .and_then(|package| package.authors)
            .and_then(|authors| match authors {
                toml::Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default();
        Manifest {
            contributors: authors
                .into_iter()
                .filter_map(|author| author.as_str().map(MetadataEntry::from))
                .collect(),
            ..Default::default()
        }
    } else {
        let data: PackageJson =
            serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?;
        Manifest {
            author: data.author.and_then(entry_from_json),
            contributors: match data.contributors {
                Some(serde_json::Value::Array(items)) => {
                    items.into_iter().filter_map(entry_from_json).collect()
                }
                _ => Vec::new(),
            },
            ..Default::default()
        }
    };

    manifest.path = Some(path.to_path_buf());
    debug!(
        author = manifest.author.is_some(),
        contributors = manifest.contributors.len(),
        "manifest metadata loaded"
    );
    Ok(manifest)
}

/// Known record fields that hold a single string.
const STRING_FIELDS: [&str; 6] = ["name", "email", "url", "github", "twitter", "mastodon"];

/// Strings and objects are usable; anything else is ignored.
fn entry_from_json(value: serde_json::Value) -> Option<MetadataEntry> {
    match value {
        serde_json::Value::String(raw) => Some(MetadataEntry::Author(raw)),
        serde_json::Value::Object(mut fields) => {
            coerce_known_fields(&mut fields);
            match serde_json::from_value(serde_json::Value::Object(fields)) {
                Ok(record) => Some(MetadataEntry::Record(record)),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable manifest contributor");
                    None
                }
            }
        }
        _ => None,
    }
}

/// Bring hand-written manifest values into the shape of a metadata record.
///
/// Numbers and booleans in string fields are stringified. An `email` list is
/// folded into `emails`. Any other mistyped value is dropped from the record.
fn coerce_known_fields(fields: &mut serde_json::Map<String, serde_json::Value>) {
    use serde_json::Value;

    if let Some(Value::Array(items)) = fields.get("email") {
        let listed: Vec<Value> = items.iter().filter(|v| v.is_string()).cloned().collect();
        fields.remove("email");
        match fields.get_mut("emails") {
            Some(Value::Array(existing)) => existing.extend(listed),
            _ => {
                fields.insert("emails".into(), Value::Array(listed));
            }
        }
    }

    for key in STRING_FIELDS {
        let coerced = match fields.get(key) {
            None | Some(Value::Null) | Some(Value::String(_)) => continue,
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(_) => None,
        };
        match coerced {
            Some(text) => {
                fields.insert(key.into(), Value::String(text));
            }
            None => {
                warn!(field = key, "ignoring non-scalar manifest contributor field");
                fields.remove(key);
            }
        }
    }

    match fields.get("emails") {
        None | Some(Value::Null) => {}
        Some(Value::String(single)) => {
            let single = single.clone();
            fields.insert("emails".into(), Value::Array(vec![Value::String(single)]));
        }
        Some(Value::Array(items)) => {
            let kept: Vec<Value> = items.iter().filter(|v| v.is_string()).cloned().collect();
            fields.insert("emails".into(), Value::Array(kept));
        }
        Some(_) => {
            warn!(field = "emails", "ignoring non-list manifest contributor field");
            fields.remove("emails");
        }
    }
}
