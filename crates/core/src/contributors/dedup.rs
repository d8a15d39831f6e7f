//! Consolidation of resolved contributors that are the same person.

use std::collections::HashMap;

use tracing::debug;

use crate::models::ResolvedContributor;

/// Extracts one identity value from a contributor.
type IdAccessor = fn(&ResolvedContributor) -> Option<&str>;

fn email(c: &ResolvedContributor) -> Option<&str> {
    Some(c.email.as_str())
}

fn name(c: &ResolvedContributor) -> Option<&str> {
    Some(c.name.as_str())
}

fn github(c: &ResolvedContributor) -> Option<&str> {
    c.github.as_deref()
}

fn social_url(c: &ResolvedContributor) -> Option<&str> {
    c.social.as_ref().map(|s| s.url.as_str())
}

/// Identity fields, in the order they are checked.
pub const ID_FIELDS: [(&str, IdAccessor); 4] = [
    ("email", email),
    ("name", name),
    ("github", github),
    ("social.url", social_url),
];

/// Merge contributors that share an email, name, GitHub handle or social
/// URL with an earlier one.
///
/// The first contributor to claim a value keeps it. A later contributor
/// matching on any field has its commits added to that earlier contributor
/// and is dropped; fields are checked in [`ID_FIELDS`] order and the first
/// hit wins. Output preserves first-seen order and the total commit count.
pub fn dedup(contributors: Vec<ResolvedContributor>) -> Vec<ResolvedContributor> {
    let mut seen: Vec<HashMap<String, usize>> = vec![HashMap::new(); ID_FIELDS.len()];
    let mut out: Vec<ResolvedContributor> = Vec::with_capacity(contributors.len());

    'next: for contributor in contributors {
        for (field, (label, accessor)) in ID_FIELDS.iter().enumerate() {
            let Some(value) = accessor(&contributor).filter(|v| !v.is_empty()) else {
                continue;
            };
            if let Some(&existing) = seen[field].get(value) {
                debug!(
                    field = label,
                    %value,
                    into = %out[existing].email,
                    "merging duplicate contributor"
                );
                out[existing].commits += contributor.commits;
                continue 'next;
            }
        }

        let position = out.len();
        for (field, (_, accessor)) in ID_FIELDS.iter().enumerate() {
            if let Some(value) = accessor(&contributor).filter(|v| !v.is_empty()) {
                seen[field].insert(value.to_string(), position);
            }
        }
        out.push(contributor);
    }

    out
}
