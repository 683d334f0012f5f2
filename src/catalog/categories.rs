use std::collections::HashSet;

use crate::api::Repository;

/// Every event repository carries this label, so it is useless as a filter.
pub const EVENT_LABEL: &str = "hacktoberfest";

/// Collect the distinct label names used by any issue of any repository,
/// in first-seen order, skipping the event label.
pub fn get_categories(repositories: &[Repository]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();

    let names = repositories
        .iter()
        .flat_map(|repository| &repository.issues)
        .flat_map(|issue| &issue.labels)
        .map(|label| label.name.as_str());

    for name in names {
        if name == EVENT_LABEL {
            continue;
        }
        if seen.insert(name) {
            categories.push(name.to_string());
        }
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{sample_issue, sample_repository};

    #[test]
    fn test_empty_input_yields_no_categories() {
        assert!(get_categories(&[]).is_empty());
    }

    #[test]
    fn test_collects_labels_across_repositories() {
        let repositories = vec![
            sample_repository(
                "org/a",
                vec![sample_issue(1, &["enhancement", "scope: frontend"])],
            ),
            sample_repository("org/b", vec![sample_issue(2, &["help wanted"])]),
        ];
        let categories = get_categories(&repositories);
        assert_eq!(
            categories,
            vec!["enhancement", "scope: frontend", "help wanted"]
        );
    }

    #[test]
    fn test_no_duplicates() {
        let repositories = vec![
            sample_repository(
                "org/a",
                vec![
                    sample_issue(1, &["difficulty: easy", "good first issue"]),
                    sample_issue(2, &["difficulty: easy"]),
                ],
            ),
            sample_repository("org/b", vec![sample_issue(3, &["good first issue"])]),
        ];
        let categories = get_categories(&repositories);
        assert_eq!(
            categories.iter().filter(|c| *c == "difficulty: easy").count(),
            1
        );
        assert_eq!(
            categories.iter().filter(|c| *c == "good first issue").count(),
            1
        );
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn test_excludes_event_label() {
        let repositories = vec![sample_repository(
            "org/a",
            vec![sample_issue(1, &["hacktoberfest", "difficulty: medium"])],
        )];
        let categories = get_categories(&repositories);
        assert!(!categories.contains(&"hacktoberfest".to_string()));
        assert_eq!(categories, vec!["difficulty: medium"]);
    }

    #[test]
    fn test_event_label_exclusion_is_case_sensitive() {
        let repositories = vec![sample_repository(
            "org/a",
            vec![sample_issue(1, &["Hacktoberfest"])],
        )];
        assert_eq!(get_categories(&repositories), vec!["Hacktoberfest"]);
    }
}
