use crate::api::{Issue, Repository};

use super::ActiveFilters;

/// Narrow the repository list down to issues carrying at least one active label.
///
/// With no active filters the list is returned as-is. Otherwise each
/// repository keeps only its matching issues, and repositories left without
/// any issue are dropped. Repository order and every field other than
/// `issues` are preserved.
pub fn filter_repositories(
    repositories: &[Repository],
    filters: &ActiveFilters,
) -> Vec<Repository> {
    if filters.is_empty() {
        return repositories.to_vec();
    }

    repositories
        .iter()
        .filter_map(|repository| {
            let issues: Vec<Issue> = repository
                .issues
                .iter()
                .filter(|issue| matches_any(issue, filters))
                .cloned()
                .collect();

            if issues.is_empty() {
                return None;
            }

            Some(Repository {
                issues,
                ..repository.clone()
            })
        })
        .collect()
}

fn matches_any(issue: &Issue, filters: &ActiveFilters) -> bool {
    issue.labels.iter().any(|label| filters.contains(&label.name))
}
