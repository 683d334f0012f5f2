use crate::api::{Issue, Label, Repository};

/// Prefix shared by the difficulty labels, compared lower-cased.
pub const DIFFICULTY_PREFIX: &str = "difficulty: ";

/// Difficulty levels recognised on issue labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a label name such as "difficulty: easy". Case-insensitive.
    pub fn from_label(name: &str) -> Option<Self> {
        match name.to_lowercase().strip_prefix(DIFFICULTY_PREFIX)? {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn score(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// Whether the label is a difficulty label at all, including unknown levels
/// like "difficulty: expert".
pub fn is_difficulty_label(label: &Label) -> bool {
    label.name.to_lowercase().starts_with(DIFFICULTY_PREFIX)
}

/// Score contributed by a single label: 1 for easy, 2 for medium, 3 for hard,
/// 0 for anything else.
fn label_score(label: &Label) -> u32 {
    Difficulty::from_label(&label.name).map_or(0, Difficulty::score)
}

/// Sort key for an issue: issues with a difficulty label come first, ordered
/// by the sum of their label scores; the rest follow.
fn issue_rank(issue: &Issue) -> (bool, u32) {
    let has_difficulty = issue.labels.iter().any(is_difficulty_label);
    let score: u32 = issue.labels.iter().map(label_score).sum();
    (!has_difficulty, score)
}

/// Copy of the issue with difficulty labels moved to the front. Stable.
pub fn with_difficulty_first(issue: &Issue) -> Issue {
    let mut labels = issue.labels.clone();
    labels.sort_by_key(|label| !is_difficulty_label(label));
    Issue {
        labels,
        ..issue.clone()
    }
}

/// Reorder each repository's issues easy, medium, hard, then issues without a
/// difficulty label, and put every issue's difficulty label first.
pub fn rank_issues_by_difficulty(repositories: &[Repository]) -> Vec<Repository> {
    repositories
        .iter()
        .map(|repository| {
            let mut issues: Vec<Issue> =
                repository.issues.iter().map(with_difficulty_first).collect();
            issues.sort_by_key(issue_rank);
            Repository {
                issues,
                ..repository.clone()
            }
        })
        .collect()
}
