//! Enrichment of commit authors with indexed metadata.

use tracing::debug;

use super::index::{IndexKind, Indices};
use super::social::resolve_social;
use crate::diagnostics::{rules, Diagnostics};
use crate::models::{MetadataRecord, RawCommitContributor, ResolvedContributor};

/// Domain suffix of GitHub's placeholder commit emails.
pub const NOREPLY_SUFFIX: &str = "@users.noreply.github.com";

const BOT_EMAIL_SUFFIXES: &[&str] = &["@greenkeeper.io"];
const BOT_NAMES: &[&str] = &["greenkeeper"];
const BOT_GITHUB_HANDLES: &[&str] = &["greenkeeper[bot]", "greenkeeperio-bot"];

/// Derive a GitHub username from a noreply address.
///
/// Both `user@users.noreply.github.com` and the newer
/// `12345+user@users.noreply.github.com` forms are recognized.
pub fn github_from_noreply(email: &str) -> Option<String> {
    let local = email.strip_suffix(NOREPLY_SUFFIX)?;
    let handle = match local.split_once('+') {
        Some((id, rest)) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => rest,
        _ => local,
    };
    (!handle.is_empty()).then(|| handle.to_string())
}

/// Whether a commit identity belongs to a known bot account.
pub fn is_bot(name: &str, email: &str, github: Option<&str>) -> bool {
    let name = name.to_lowercase();
    BOT_EMAIL_SUFFIXES.iter().any(|suffix| email.ends_with(suffix))
        || BOT_NAMES.contains(&name.as_str())
        || github.is_some_and(|handle| BOT_GITHUB_HANDLES.contains(&handle))
}

/// Resolve a single commit author.
///
/// Returns `None` when the author is dropped: either it has no email (which
/// is reported to `sink`) or it is a bot (which is not).
pub fn resolve_contributor(
    raw: &RawCommitContributor,
    indices: &mut Indices,
    sink: &mut Diagnostics,
) -> Option<ResolvedContributor> {
    let RawCommitContributor {
        name,
        email,
        commits,
    } = raw;

    if email.is_empty() {
        sink.warn(rules::REQUIRE_GIT_EMAIL, format!("no git email for `{name}`"));
        return None;
    }

    let mut metadata: MetadataRecord = indices
        .by_email(email)
        .or_else(|| indices.by_name(name))
        .cloned()
        .unwrap_or_default();

    if let Some(handle) = github_from_noreply(email) {
        debug!(%email, github = %handle, "derived github handle from noreply email");
        metadata.github = Some(handle.clone());
        indices.insert(IndexKind::GitHub, &handle, metadata.clone());
    }

    if is_bot(name, email, metadata.github.as_deref()) {
        debug!(%email, "skipping bot contributor");
        return None;
    }

    let social = resolve_social(&metadata, email, sink);

    Some(ResolvedContributor {
        email: email.clone(),
        commits: *commits,
        name: metadata
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| name.clone()),
        github: metadata.github.filter(|g| !g.is_empty()),
        social,
    })
}

/// Resolve every commit author in order, dropping the ones that cannot or
/// should not be credited.
pub fn resolve_contributors(
    raw: &[RawCommitContributor],
    indices: &mut Indices,
    sink: &mut Diagnostics,
) -> Vec<ResolvedContributor> {
    raw.iter()
        .filter_map(|contributor| resolve_contributor(contributor, indices, sink))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetadataEntry, Social};

    #[test]
    fn test_noreply_with_numeric_id() {
        assert_eq!(
            github_from_noreply("944406+wooorm@users.noreply.github.com").as_deref(),
            Some("wooorm")
        );
    }

    #[test]
    fn test_noreply_without_id() {
        assert_eq!(
            github_from_noreply("wooorm@users.noreply.github.com").as_deref(),
            Some("wooorm")
        );
        assert_eq!(
            github_from_noreply("a1+b@users.noreply.github.com").as_deref(),
            Some("a1+b")
        );
        assert_eq!(github_from_noreply("wooorm@example.com"), None);
        assert_eq!(github_from_noreply("@users.noreply.github.com"), None);
    }

    #[test]
    fn test_bot_detection() {
        assert!(is_bot("Anyone", "greenkeeper@greenkeeper.io", None));
        assert!(is_bot("GreenKeeper", "x@example.com", None));
        assert!(is_bot("x", "x@example.com", Some("greenkeeper[bot]")));
        assert!(is_bot("x", "x@example.com", Some("greenkeeperio-bot")));
        assert!(!is_bot("Jane", "jane@example.com", Some("jane")));
    }

    #[test]
    fn test_missing_email_is_reported() {
        let mut indices = Indices::new();
        let mut sink = Diagnostics::new();
        let raw = RawCommitContributor::new("Jane", "", 3);

        assert_eq!(resolve_contributor(&raw, &mut indices, &mut sink), None);
        let diagnostic = sink.iter().next().unwrap();
        assert_eq!(diagnostic.rule_id, rules::REQUIRE_GIT_EMAIL);
        assert_eq!(diagnostic.message, "no git email for `Jane`");
    }

    #[test]
    fn test_bots_are_dropped_silently() {
        let mut indices = Indices::new();
        let mut sink = Diagnostics::new();
        let raw = [
            RawCommitContributor::new("greenkeeper[bot]", "greenkeeper@greenkeeper.io", 4),
            RawCommitContributor::new("Greenkeeper", "bot@example.com", 1),
            RawCommitContributor::new(
                "bot",
                "23040076+greenkeeper[bot]@users.noreply.github.com",
                2,
            ),
        ];
        assert!(resolve_contributors(&raw, &mut indices, &mut sink).is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_lookup_by_email_then_name() {
        let entries = vec![
            MetadataEntry::Record(MetadataRecord {
                email: Some("jane@example.com".into()),
                name: Some("Jane Doe".into()),
                twitter: Some("jane".into()),
                ..Default::default()
            }),
            MetadataEntry::Record(MetadataRecord {
                name: Some("John Roe".into()),
                github: Some("jroe".into()),
                ..Default::default()
            }),
        ];
        let mut indices = Indices::from_entries(&entries);
        let mut sink = Diagnostics::new();

        let jane = resolve_contributor(
            &RawCommitContributor::new("jane", "JANE@example.com", 2),
            &mut indices,
            &mut sink,
        )
        .unwrap();
        assert_eq!(jane.name, "Jane Doe");
        assert_eq!(jane.email, "JANE@example.com");
        assert_eq!(
            jane.social,
            Some(Social {
                url: "https://twitter.com/jane".into(),
                text: "@jane@twitter".into(),
            })
        );

        let john = resolve_contributor(
            &RawCommitContributor::new("john roe", "john@example.com", 1),
            &mut indices,
            &mut sink,
        )
        .unwrap();
        assert_eq!(john.name, "John Roe");
        assert_eq!(john.github.as_deref(), Some("jroe"));
        assert!(sink.has_rule(rules::SOCIAL));
    }

    #[test]
    fn test_noreply_handle_is_registered() {
        let entries = vec![MetadataEntry::Record(MetadataRecord {
            github: Some("wooorm".into()),
            mastodon: Some("@wooorm@mastodon.social".into()),
            ..Default::default()
        })];
        let mut indices = Indices::from_entries(&entries);
        let mut sink = Diagnostics::new();

        let resolved = resolve_contributor(
            &RawCommitContributor::new("Titus", "944406+wooorm@users.noreply.github.com", 5),
            &mut indices,
            &mut sink,
        )
        .unwrap();
        assert_eq!(resolved.github.as_deref(), Some("wooorm"));
        assert_eq!(resolved.name, "Titus");
        assert_eq!(resolved.social, None);
        assert!(sink.has_rule(rules::SOCIAL));

        let registered = indices.by_github("WOOORM").unwrap();
        assert_eq!(registered.mastodon.as_deref(), Some("@wooorm@mastodon.social"));
    }

    #[test]
    fn test_noreply_keeps_email_matched_metadata() {
        let email = "123+wooorm@users.noreply.github.com";
        let entries = vec![
            MetadataEntry::Record(MetadataRecord {
                github: Some("wooorm".into()),
                name: Some("Some Other Name".into()),
                ..Default::default()
            }),
            MetadataEntry::Record(MetadataRecord {
                name: Some("Titus Wormer".into()),
                email: Some(email.into()),
                ..Default::default()
            }),
        ];
        let mut indices = Indices::from_entries(&entries);
        let mut sink = Diagnostics::new();

        let resolved = resolve_contributor(
            &RawCommitContributor::new("titus", email, 2),
            &mut indices,
            &mut sink,
        )
        .unwrap();
        assert_eq!(resolved.name, "Titus Wormer");
        assert_eq!(resolved.github.as_deref(), Some("wooorm"));
        assert_eq!(
            indices.by_github("wooorm").unwrap().name.as_deref(),
            Some("Some Other Name")
        );
    }

    #[test]
    fn test_unknown_contributor_keeps_git_identity() {
        let mut indices = Indices::new();
        let mut sink = Diagnostics::new();
        let resolved = resolve_contributor(
            &RawCommitContributor::new("Someone", "someone@example.com", 7),
            &mut indices,
            &mut sink,
        )
        .unwrap();
        assert_eq!(
            resolved,
            ResolvedContributor {
                email: "someone@example.com".into(),
                commits: 7,
                name: "Someone".into(),
                github: None,
                social: None,
            }
        );
    }
}
