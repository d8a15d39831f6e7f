//! Parser for single-line author strings.
//!
//! Accepts the `Name <email> (url)` convention used by package manifests,
//! where every part is optional.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::models::MetadataRecord;

fn author_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([^<(]+?)?[ \t]*(?:<([^>(]+?)>)?[ \t]*(?:\(([^)]+?)\)|$)")
            .expect("author pattern is valid")
    })
}

/// Parse `Name <email> (url)` into a record.
///
/// Parts that are missing stay `None`. Input that does not follow the
/// convention at all yields an empty record.
pub fn parse_author(raw: &str) -> MetadataRecord {
    let mut record = MetadataRecord::default();
    let line = raw.lines().next().unwrap_or("").trim();

    let Some(captures) = author_pattern().captures(line) else {
        return record;
    };

    let part = |index: usize| {
        captures
            .get(index)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };

    record.name = part(1);
    record.email = part(2);
    record.url = part(3);
    record
}
