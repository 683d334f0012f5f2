pub mod categories;
pub mod contributors;
pub mod difficulty;
pub mod filter;

pub use categories::get_categories;
pub use contributors::{rank_contributors, SortedContributor};
pub use difficulty::rank_issues_by_difficulty;
pub use filter::filter_repositories;

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::api::{Contributor, Repository};

/// Label names the visitor selected to narrow down the issue list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActiveFilters(BTreeSet<String>);

impl ActiveFilters {
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveFilters {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Everything the board displays, derived from one fetched snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    /// Filter choices, taken from the unfiltered repositories
    pub categories: Vec<String>,
    pub active_filters: ActiveFilters,
    pub repositories: Vec<Repository>,
    pub contributors: Vec<SortedContributor>,
}

/// Run the whole pipeline over a fetched snapshot.
///
/// Categories come from the unfiltered list so every choice stays visible.
/// Repositories are filtered, then their issues ranked by difficulty; with
/// filters active the result is ordered by most recent update.
#[instrument(skip_all, fields(repositories = repositories.len(), contributors = contributors.len(), filters = filters.len()))]
pub fn build_board(
    repositories: &[Repository],
    contributors: &[Contributor],
    filters: &ActiveFilters,
    top_count: usize,
) -> Board {
    let categories = get_categories(repositories);
    for unknown in filters.iter().filter(|f| !categories.iter().any(|c| c == f)) {
        warn!(label = unknown, "filter matches no label in the fetched repositories");
    }

    let mut shown = rank_issues_by_difficulty(&filter_repositories(repositories, filters));
    if !filters.is_empty() {
        sort_by_recency(&mut shown);
    }

    let contributors = rank_contributors(contributors, top_count);
    debug!(
        categories = categories.len(),
        shown = shown.len(),
        top = contributors.iter().filter(|c| c.is_top_contributor).count(),
        "board built"
    );

    Board {
        categories,
        active_filters: filters.clone(),
        repositories: shown,
        contributors,
    }
}

/// Most recently updated repositories first. Stable on equal timestamps.
pub fn sort_by_recency(repositories: &mut [Repository]) {
    repositories.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
