//! Ordering, truncation and column visibility for the final table.

use std::cmp::Ordering;

use crate::models::ResolvedContributor;

fn by_commits_then_name(a: &ResolvedContributor, b: &ResolvedContributor) -> Ordering {
    b.commits.cmp(&a.commits).then_with(|| a.name.cmp(&b.name))
}

/// Sort by commit count descending, then name ascending, and keep at most
/// `limit` entries. A `limit` of 0 keeps everyone.
pub fn rank(mut contributors: Vec<ResolvedContributor>, limit: usize) -> Vec<ResolvedContributor> {
    contributors.sort_by(by_commits_then_name);
    if limit > 0 {
        contributors.truncate(limit);
    }
    contributors
}

/// Optional table columns that have at least one non-empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub github: bool,
    pub social: bool,
}

impl Columns {
    /// Inspect the contributors that will actually be displayed.
    pub fn for_contributors(contributors: &[ResolvedContributor]) -> Self {
        Self {
            github: contributors.iter().any(|c| c.github.is_some()),
            social: contributors.iter().any(|c| c.social.is_some()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Social;

    fn contributor(name: &str, commits: u64) -> ResolvedContributor {
        ResolvedContributor {
            email: format!("{}@example.com", name.to_lowercase()),
            commits,
            name: name.into(),
            github: None,
            social: None,
        }
    }

    fn names(contributors: &[ResolvedContributor]) -> Vec<&str> {
        contributors.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_commits_descending_then_name() {
        let ranked = rank(
            vec![
                contributor("Charlie", 1),
                contributor("Alpha", 3),
                contributor("Bravo", 1),
            ],
            0,
        );
        assert_eq!(names(&ranked), vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn test_name_tiebreak_is_case_sensitive() {
        let ranked = rank(vec![contributor("alpha", 2), contributor("Zulu", 2)], 0);
        assert_eq!(names(&ranked), vec!["Zulu", "alpha"]);
    }

    #[test]
    fn test_limit_keeps_top() {
        let ranked = rank(
            vec![
                contributor("Low", 1),
                contributor("High", 9),
                contributor("Mid", 4),
            ],
            1,
        );
        assert_eq!(names(&ranked), vec!["High"]);
    }

    #[test]
    fn test_limit_larger_than_list() {
        let ranked = rank(vec![contributor("Only", 1)], 5);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_columns_follow_displayed_subset() {
        let mut top = contributor("Top", 10);
        top.github = None;
        let mut rest = contributor("Rest", 1);
        rest.github = Some("rest".into());
        rest.social = Some(Social {
            url: "https://twitter.com/rest".into(),
            text: "@rest@twitter".into(),
        });

        let all = rank(vec![top.clone(), rest], 0);
        assert_eq!(
            Columns::for_contributors(&all),
            Columns {
                github: true,
                social: true
            }
        );

        let limited = rank(all, 1);
        assert_eq!(
            Columns::for_contributors(&limited),
            Columns {
                github: false,
                social: false
            }
        );
    }
}
