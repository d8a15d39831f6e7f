//! End-to-end tests for the contributors transform.
//!
//! These tests exercise the real `ContributorsTransform` with:
//! - Local Git repos created via `git2::Repository::init`
//! - Real `package.json` / metadata files on disk
//!
//! No network I/O and no `git` binary required.

use std::path::Path;

use git2::{Repository, Signature};
use tempfile::TempDir;

use git_contributors_core::config::{ContributorsConfig, ContributorsSetting};
use git_contributors_core::diagnostics::rules;
use git_contributors_core::ContributorsTransform;

// ===========================================================================
// Helpers
// ===========================================================================

/// Commit `file` (with fresh contents) as the given author.
fn commit_as(repo: &Repository, name: &str, email: &str, file: &str) {
    let workdir = repo.workdir().unwrap().to_path_buf();
    let path = workdir.join(file);
    let previous = std::fs::read_to_string(&path).unwrap_or_default();
    std::fs::write(&path, format!("{previous}{name}\n")).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(file)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = Signature::now(name, email).unwrap();
    let parent = repo.head().ok().map(|h| h.peel_to_commit().unwrap());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, "change", &tree, &parents)
        .unwrap();
}

fn repo_with_history(authors: &[(&str, &str)]) -> (TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    for (name, email) in authors {
        commit_as(&repo, name, email, "log.txt");
    }
    (dir, repo)
}

fn config_for(dir: &Path) -> ContributorsConfig {
    ContributorsConfig {
        cwd: Some(dir.to_path_buf()),
        mailmap: false,
        ..Default::default()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn test_interleaved_authors_ranked() {
    let (dir, _repo) = repo_with_history(&[
        ("Alpha", "alpha@example.com"),
        ("Bravo", "bravo@example.com"),
        ("Alpha", "alpha@example.com"),
        ("Charlie", "charlie@example.com"),
        ("Alpha", "alpha@example.com"),
    ]);

    let transform = ContributorsTransform::new(config_for(dir.path()));
    let outcome = transform
        .run("# Project\n\n## Contributors\n\nTBD\n", &dir.path().join("readme.md"))
        .await
        .unwrap();

    let names: Vec<&str> = outcome.contributors.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
    assert_eq!(outcome.contributors[0].commits, 3);

    let document = outcome.document.unwrap();
    assert!(!document.contains("TBD"));
    assert_eq!(
        document,
        "# Project\n\n## Contributors\n\n\
         | Name    |\n\
         | :------ |\n\
         | Alpha   |\n\
         | Bravo   |\n\
         | Charlie |\n"
    );
}

#[tokio::test]
async fn test_package_json_and_noreply_enrichment() {
    let (dir, _repo) = repo_with_history(&[
        ("Titus", "944406+wooorm@users.noreply.github.com"),
        ("Titus Wormer", "tituswormer@gmail.com"),
        ("Jane", "jane@example.com"),
    ]);
    std::fs::write(
        dir.path().join("package.json"),
        r#"{
  "author": "Titus Wormer <tituswormer@gmail.com>",
  "contributors": [
    {"name": "Jane Doe", "email": "jane@example.com", "mastodon": "@jane@example.social"},
    {"name": "Titus Wormer", "github": "wooorm", "twitter": "@wooorm"}
  ]
}"#,
    )
    .unwrap();

    let transform = ContributorsTransform::new(config_for(dir.path()));
    let outcome = transform
        .run("## Contributors\n", &dir.path().join("readme.md"))
        .await
        .unwrap();

    // The noreply address resolves to the same person as the gmail one
    // through the GitHub handle, so both collapse into one row.
    assert_eq!(outcome.contributors.len(), 2);
    assert_eq!(outcome.contributors[0].name, "Titus Wormer");
    assert_eq!(outcome.contributors[0].commits, 2);
    assert_eq!(outcome.contributors[0].github.as_deref(), Some("wooorm"));
    let jane = outcome
        .contributors
        .iter()
        .find(|c| c.name == "Jane Doe")
        .unwrap();
    assert_eq!(
        jane.social.as_ref().map(|s| s.url.as_str()),
        Some("https://example.social/@jane")
    );

    let document = outcome.document.unwrap();
    assert!(document.contains("[**@wooorm**](https://github.com/wooorm)"));
    assert!(document.contains("[**@jane@example.social**](https://example.social/@jane)"));

    let total: u64 = outcome.contributors.iter().map(|c| c.commits).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_metadata_file_and_limit() {
    let (dir, _repo) = repo_with_history(&[
        ("Low", "low@example.com"),
        ("High", "high@example.com"),
        ("High", "high@example.com"),
    ]);
    std::fs::write(
        dir.path().join("people.toml"),
        r#"
contributors = [
  { email = "low@example.com", github = "low" },
]
"#,
    )
    .unwrap();

    let config = ContributorsConfig {
        contributors: Some(ContributorsSetting::Module("people.toml".into())),
        limit: 1,
        ..config_for(dir.path())
    };
    let outcome = ContributorsTransform::new(config)
        .run("## Contributors\n", &dir.path().join("readme.md"))
        .await
        .unwrap();

    assert_eq!(outcome.contributors.len(), 1);
    assert_eq!(outcome.contributors[0].name, "High");
    // Only "Low" had a GitHub handle and it was cut by the limit.
    assert!(!outcome.document.unwrap().contains("GitHub"));
}

#[tokio::test]
async fn test_append_if_missing() {
    let (dir, _repo) = repo_with_history(&[("Alpha", "alpha@example.com")]);
    let config = ContributorsConfig {
        append_if_missing: true,
        ..config_for(dir.path())
    };
    let outcome = ContributorsTransform::new(config)
        .run("# Project\n\nIntro.\n", &dir.path().join("readme.md"))
        .await
        .unwrap();

    assert_eq!(
        outcome.document.unwrap(),
        "# Project\n\nIntro.\n\n## Contributors\n\n| Name  |\n| :---- |\n| Alpha |\n"
    );
}

#[tokio::test]
async fn test_empty_repository_is_informational() {
    let dir = tempfile::tempdir().unwrap();
    Repository::init(dir.path()).unwrap();

    let outcome = ContributorsTransform::new(config_for(dir.path()))
        .run("## Contributors\n", &dir.path().join("readme.md"))
        .await
        .unwrap();
    assert!(outcome.document.is_none());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].rule_id, rules::NO_COMMITS);
}

#[tokio::test]
async fn test_malformed_manifest_aborts() {
    let (dir, _repo) = repo_with_history(&[("Alpha", "alpha@example.com")]);
    std::fs::write(dir.path().join("package.json"), "{ not json").unwrap();

    let result = ContributorsTransform::new(config_for(dir.path()))
        .run("## Contributors\n", &dir.path().join("readme.md"))
        .await;
    assert!(result.is_err());
}
