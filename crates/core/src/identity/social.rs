//! Normalization of social handles into canonical profile links.

use crate::diagnostics::{rules, Diagnostics};
use crate::models::{MetadataRecord, Social};

/// Parse a Twitter handle, `@handle`, or profile URL.
///
/// The handle is the last non-empty segment after splitting on `@` and `/`.
pub fn twitter_profile(raw: &str) -> Option<Social> {
    let handle = raw
        .split(['@', '/'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .last()?;

    Some(Social {
        url: format!("https://twitter.com/{handle}"),
        text: format!("@{handle}@twitter"),
    })
}

/// Parse a Mastodon handle in `@user@domain` or `user@domain` form.
pub fn mastodon_profile(raw: &str) -> Option<Social> {
    let parts: Vec<&str> = raw.split('@').filter(|part| !part.is_empty()).collect();
    let [handle, domain] = parts.as_slice() else {
        return None;
    };

    Some(Social {
        url: format!("https://{domain}/@{handle}"),
        text: format!("@{handle}@{domain}"),
    })
}

/// Pick the social profile for a contributor.
///
/// Twitter metadata is consulted first; Mastodon only when Twitter is
/// absent. Invalid handles and missing profiles are reported to `sink`.
pub fn resolve_social(
    metadata: &MetadataRecord,
    email: &str,
    sink: &mut Diagnostics,
) -> Option<Social> {
    if let Some(twitter) = metadata.twitter.as_deref().filter(|s| !s.is_empty()) {
        let social = twitter_profile(twitter);
        if social.is_none() {
            sink.warn(
                rules::VALID_TWITTER,
                format!("invalid twitter handle for `{email}`"),
            );
        }
        return social;
    }

    if let Some(mastodon) = metadata.mastodon.as_deref().filter(|s| !s.is_empty()) {
        let social = mastodon_profile(mastodon);
        if social.is_none() {
            sink.warn(
                rules::VALID_MASTODON,
                format!("invalid mastodon handle for `{email}`"),
            );
        }
        return social;
    }

    sink.info(rules::SOCIAL, format!("no social profile for `{email}`"));
    None
}
