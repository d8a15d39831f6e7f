//! Domain model types used throughout git-contributors.
//!
//! These types bridge the metadata sources, the identity engine, and the
//! renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Supplemental identity information for one person.
///
/// Every field is optional. Unknown fields are kept in `extra` and travel
/// with the record through merges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Additional addresses the person commits under.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// GitHub username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,

    /// Twitter handle, `@handle`, or profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    /// Mastodon handle in `@user@domain` or `user@domain` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastodon: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MetadataRecord {
    /// Every address this record claims: the `emails` list followed by the
    /// singular `email`, without duplicates.
    pub fn all_emails(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for email in self.emails.iter().chain(self.email.iter()) {
            if !email.is_empty() && !out.contains(&email.as_str()) {
                out.push(email);
            }
        }
        out
    }

    /// Return `self` with every field that `existing` defines copied over it.
    ///
    /// `existing` is authoritative: values already known to the index are
    /// never replaced by values from a later record. Email lists are unioned.
    pub fn merged_with(mut self, existing: &MetadataRecord) -> MetadataRecord {
        fn take(slot: &mut Option<String>, known: &Option<String>) {
            if let Some(value) = known {
                *slot = Some(value.clone());
            }
        }

        take(&mut self.name, &existing.name);
        take(&mut self.email, &existing.email);
        take(&mut self.url, &existing.url);
        take(&mut self.github, &existing.github);
        take(&mut self.twitter, &existing.twitter);
        take(&mut self.mastodon, &existing.mastodon);

        let mut emails = existing.emails.clone();
        for email in self.emails.drain(..) {
            if !emails.contains(&email) {
                emails.push(email);
            }
        }
        self.emails = emails;

        for (key, value) in &existing.extra {
            self.extra.insert(key.clone(), value.clone());
        }
        self
    }
}

/// One entry of a contributors list: either a `Name <email> (url)` string
/// or a structured record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataEntry {
    Author(String),
    Record(MetadataRecord),
}

impl From<MetadataRecord> for MetadataEntry {
    fn from(record: MetadataRecord) -> Self {
        Self::Record(record)
    }
}

impl From<&str> for MetadataEntry {
    fn from(author: &str) -> Self {
        Self::Author(author.to_string())
    }
}

// ---------------------------------------------------------------------------
// Contributors
// ---------------------------------------------------------------------------

/// A commit author as reported by the commit source, already aggregated
/// per email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommitContributor {
    pub name: String,
    pub email: String,
    pub commits: u64,
}

impl RawCommitContributor {
    pub fn new(name: impl Into<String>, email: impl Into<String>, commits: u64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            commits,
        }
    }
}

/// Canonical social profile reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    /// Profile link.
    pub url: String,
    /// Display label such as `@user@twitter` or `@user@mastodon.social`.
    pub text: String,
}

/// A commit author enriched with metadata, ready for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedContributor {
    pub email: String,
    pub commits: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<Social>,
}
