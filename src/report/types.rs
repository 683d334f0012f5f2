use serde::Serialize;

use crate::api::{Contributor, Issue, Label, Repository};
use crate::catalog::Board;
use crate::countdown::Countdown;

/// Labels shown on an issue card.
pub const MAX_ISSUE_LABELS: usize = 3;
/// Language badges shown on a repository card.
pub const MAX_LANGUAGES: usize = 8;
/// Segments in a contributor's pull request bar.
pub const MAX_BAR_SEGMENTS: u64 = 30;

/// Complete report: the board plus the countdown at render time.
#[derive(Debug, Serialize)]
pub struct Report {
    pub countdown: Countdown,
    #[serde(flatten)]
    pub board: Board,
}

/// First few labels of an issue, difficulty first once the issue is ranked.
pub fn visible_labels(issue: &Issue) -> &[Label] {
    &issue.labels[..issue.labels.len().min(MAX_ISSUE_LABELS)]
}

/// Languages sorted alphabetically, capped at `MAX_LANGUAGES`.
pub fn visible_languages(repository: &Repository) -> Vec<&str> {
    let mut languages: Vec<&str> = repository.languages.iter().map(String::as_str).collect();
    languages.sort_unstable();
    languages.truncate(MAX_LANGUAGES);
    languages
}

/// How many merged and pending segments a contributor's bar gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionBar {
    pub merged: u64,
    pub pending: u64,
}

impl ContributionBar {
    /// One segment per pull request. Past `MAX_BAR_SEGMENTS` the merged/pending
    /// split is scaled down proportionally to exactly `MAX_BAR_SEGMENTS`.
    pub fn for_contributor(contributor: &Contributor) -> Self {
        let total = contributor.total_pulls();
        if total <= MAX_BAR_SEGMENTS {
            return Self {
                merged: contributor.merged_pulls,
                pending: contributor.pending_pulls,
            };
        }

        // round half up; widened so large tallies cannot overflow
        let total = u128::from(contributor.merged_pulls) + u128::from(contributor.pending_pulls);
        let segments = u128::from(MAX_BAR_SEGMENTS);
        let scaled = (u128::from(contributor.merged_pulls) * segments * 2 + total) / (total * 2);
        let merged = scaled.min(segments) as u64;
        Self {
            merged,
            pending: MAX_BAR_SEGMENTS - merged,
        }
    }

    pub fn segments(&self) -> u64 {
        self.merged + self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn contributor(merged_pulls: u64, pending_pulls: u64) -> Contributor {
        Contributor {
            full_name: "anyContributor".to_string(),
            profile_url: "https://github.com/johnsmith".to_string(),
            merged_pulls,
            pending_pulls,
        }
    }

    fn issue_with_labels(count: usize) -> Issue {
        Issue {
            html_url: "https://github.com/org/repo/issues/1".to_string(),
            title: "anyIssue".to_string(),
            comments: 10,
            node_id: String::new(),
            user: None,
            labels: (1..=count)
                .map(|i| Label {
                    name: format!("issue label {i}"),
                    color: "red".to_string(),
                    description: "any issue description".to_string(),
                })
                .collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bar_as_is_below_limit() {
        let bar = ContributionBar::for_contributor(&contributor(10, 2));
        assert_eq!(bar, ContributionBar { merged: 10, pending: 2 });
        assert_eq!(bar.segments(), 12);
    }

    #[test]
    fn test_bar_limited_to_thirty_segments() {
        let bar = ContributionBar::for_contributor(&contributor(21, 42));
        assert_eq!(bar.segments(), 30);
        assert_eq!(bar, ContributionBar { merged: 10, pending: 20 });
    }

    #[test]
    fn test_bar_scaling_keeps_small_shares_visible() {
        let bar = ContributionBar::for_contributor(&contributor(1, 59));
        assert_eq!(bar, ContributionBar { merged: 1, pending: 29 });
    }

    #[test]
    fn test_bar_scaling_handles_huge_tallies() {
        let bar = ContributionBar::for_contributor(&contributor(1 << 60, 1 << 60));
        assert_eq!(bar, ContributionBar { merged: 15, pending: 15 });

        let bar = ContributionBar::for_contributor(&contributor(u64::MAX, u64::MAX));
        assert_eq!(bar.segments(), 30);

        let bar = ContributionBar::for_contributor(&contributor(u64::MAX, 0));
        assert_eq!(bar, ContributionBar { merged: 30, pending: 0 });
    }

    #[test]
    fn test_empty_bar() {
        assert_eq!(ContributionBar::for_contributor(&contributor(0, 0)).segments(), 0);
    }

    #[test]
    fn test_only_first_three_labels_visible() {
        let issue = issue_with_labels(4);
        let names: Vec<&str> = visible_labels(&issue).iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["issue label 1", "issue label 2", "issue label 3"]);
        assert_eq!(visible_labels(&issue_with_labels(1)).len(), 1);
        assert!(visible_labels(&issue_with_labels(0)).is_empty());
    }
}
