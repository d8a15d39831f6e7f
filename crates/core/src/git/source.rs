//! Commit authorship read from a local repository via `git2`.

use std::collections::HashMap;
use std::path::Path;

use git2::{ErrorCode, Repository, Signature, Sort};
use tracing::{debug, info, instrument};

use crate::errors::GitError;
use crate::models::RawCommitContributor;

/// Something that can list the commit authors of a directory's history.
pub trait CommitSource: Send + Sync {
    /// One entry per distinct author email, with its commit count.
    fn list(&self, dir: &Path) -> Result<Vec<RawCommitContributor>, GitError>;
}

/// [`CommitSource`] backed by libgit2.
#[derive(Debug, Clone)]
pub struct GitCommitSource {
    mailmap: bool,
}

impl Default for GitCommitSource {
    fn default() -> Self {
        Self { mailmap: true }
    }
}

impl GitCommitSource {
    pub fn new(mailmap: bool) -> Self {
        Self { mailmap }
    }
}

impl CommitSource for GitCommitSource {
    /// Walk every commit reachable from HEAD and count commits per author
    /// email. The first name seen for an email (newest commit) is kept.
    /// Entries are ordered by commit count, ties in first-seen order.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    fn list(&self, dir: &Path) -> Result<Vec<RawCommitContributor>, GitError> {
        let repo = Repository::discover(dir)
            .map_err(|_| GitError::RepositoryNotFound(dir.display().to_string()))?;

        if let Err(e) = repo.head() {
            if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) {
                return Err(GitError::NoCommits(dir.display().to_string()));
            }
            return Err(e.into());
        }

        let mailmap = if self.mailmap {
            Some(repo.mailmap()?)
        } else {
            None
        };

        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        let mut contributors: Vec<RawCommitContributor> = Vec::new();
        let mut by_email: HashMap<String, usize> = HashMap::new();
        let mut total = 0usize;

        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            let author: Signature<'_> = match &mailmap {
                Some(mailmap) => commit.author_with_mailmap(mailmap)?,
                None => commit.author().to_owned(),
            };
            let name = String::from_utf8_lossy(author.name_bytes()).into_owned();
            let email = String::from_utf8_lossy(author.email_bytes()).into_owned();
            total += 1;

            match by_email.get(&email) {
                Some(&position) => contributors[position].commits += 1,
                None => {
                    by_email.insert(email.clone(), contributors.len());
                    contributors.push(RawCommitContributor::new(name, email, 1));
                }
            }
        }

        contributors.sort_by(|a, b| b.commits.cmp(&a.commits));
        info!(
            commits = total,
            authors = contributors.len(),
            "collected git contributors"
        );
        debug!(?contributors, "raw contributors");
        Ok(contributors)
    }
}
