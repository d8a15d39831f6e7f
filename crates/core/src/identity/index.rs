//! Identity indexer: lookup tables of contributor metadata keyed by email,
//! name, and GitHub handle.
//!
//! Records that collide on any key are merged. The record already present in
//! a table is authoritative for the fields it defines; the incoming record
//! contributes everything else. The merged record then replaces the entry
//! under every key it claims, so a later lookup by any of those keys sees the
//! union of what is known so far.

use std::collections::HashMap;

use tracing::debug;

use super::author::parse_author;
use crate::models::{MetadataEntry, MetadataRecord};

/// Which lookup table a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Email,
    Name,
    GitHub,
}

/// The three case-insensitive lookup tables.
#[derive(Debug, Clone, Default)]
pub struct Indices {
    email: HashMap<String, MetadataRecord>,
    name: HashMap<String, MetadataRecord>,
    github: HashMap<String, MetadataRecord>,
}

fn normalize_key(raw: &str) -> Option<String> {
    let key = raw.trim().to_lowercase();
    (!key.is_empty()).then_some(key)
}

impl Indices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build indices from a list of metadata entries, in order.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a MetadataEntry>) -> Self {
        let mut indices = Self::new();
        for entry in entries {
            indices.index_entry(entry);
        }
        indices
    }

    fn table(&self, kind: IndexKind) -> &HashMap<String, MetadataRecord> {
        match kind {
            IndexKind::Email => &self.email,
            IndexKind::Name => &self.name,
            IndexKind::GitHub => &self.github,
        }
    }

    fn table_mut(&mut self, kind: IndexKind) -> &mut HashMap<String, MetadataRecord> {
        match kind {
            IndexKind::Email => &mut self.email,
            IndexKind::Name => &mut self.name,
            IndexKind::GitHub => &mut self.github,
        }
    }

    /// Index one entry. Author strings are parsed first; structured records
    /// are copied so the caller's data is never touched.
    pub fn index_entry(&mut self, entry: &MetadataEntry) {
        let record = match entry {
            MetadataEntry::Author(raw) => parse_author(raw),
            MetadataEntry::Record(record) => record.clone(),
        };
        self.index_record(record);
    }

    /// Index one record under all of its identity keys.
    ///
    /// The record's own emails, GitHub handle, and name are absorbed in that
    /// order. The merged result is then stored under its own keys and under
    /// any key it picked up from an earlier record, so a handle learned
    /// through an email collision is indexed too.
    pub fn index_record(&mut self, record: MetadataRecord) {
        let own_keys = identity_keys(&record);

        let mut merged = record;
        for (kind, key) in &own_keys {
            merged = self.absorb(*kind, key, merged);
        }

        let mut keys = own_keys;
        for key in identity_keys(&merged) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        debug!(
            name = merged.name.as_deref().unwrap_or(""),
            keys = keys.len(),
            "indexed contributor metadata"
        );
        for (kind, key) in keys {
            self.table_mut(kind).insert(key, merged.clone());
        }
    }

    /// Insert `record` under a single key, merging any record already stored
    /// there. Returns the record as stored.
    pub fn insert(&mut self, kind: IndexKind, raw_key: &str, record: MetadataRecord) -> MetadataRecord {
        let Some(key) = normalize_key(raw_key) else {
            return record;
        };
        let merged = match self.table(kind).get(&key) {
            Some(existing) => record.merged_with(existing),
            None => record,
        };
        self.table_mut(kind).insert(key, merged.clone());
        merged
    }

    /// Look up a record by key, case-insensitively.
    pub fn get(&self, kind: IndexKind, raw_key: &str) -> Option<&MetadataRecord> {
        normalize_key(raw_key).and_then(|key| self.table(kind).get(&key))
    }

    pub fn by_email(&self, email: &str) -> Option<&MetadataRecord> {
        self.get(IndexKind::Email, email)
    }

    pub fn by_name(&self, name: &str) -> Option<&MetadataRecord> {
        self.get(IndexKind::Name, name)
    }

    pub fn by_github(&self, handle: &str) -> Option<&MetadataRecord> {
        self.get(IndexKind::GitHub, handle)
    }

    /// Number of keys across all three tables.
    pub fn len(&self) -> usize {
        self.email.len() + self.name.len() + self.github.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn absorb(&self, kind: IndexKind, raw_key: &str, record: MetadataRecord) -> MetadataRecord {
        match normalize_key(raw_key).and_then(|key| self.table(kind).get(&key)) {
            Some(existing) => record.merged_with(existing),
            None => record,
        }
    }
}

/// Normalized keys a record claims: emails, then GitHub handle, then name.
fn identity_keys(record: &MetadataRecord) -> Vec<(IndexKind, String)> {
    let mut keys: Vec<(IndexKind, String)> = Vec::new();
    for key in record.all_emails().into_iter().filter_map(normalize_key) {
        if !keys.iter().any(|(_, existing)| *existing == key) {
            keys.push((IndexKind::Email, key));
        }
    }
    if let Some(key) = record.github.as_deref().and_then(normalize_key) {
        keys.push((IndexKind::GitHub, key));
    }
    if let Some(key) = record.name.as_deref().and_then(normalize_key) {
        keys.push((IndexKind::Name, key));
    }
    keys
}
