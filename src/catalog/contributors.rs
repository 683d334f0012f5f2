use serde::Serialize;

use crate::api::Contributor;

/// How many leading contributors are tagged as top contributors by default.
pub const DEFAULT_TOP_COUNT: usize = 10;

/// A contributor with its place on the leaderboard resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortedContributor {
    #[serde(flatten)]
    pub contributor: Contributor,
    #[serde(rename = "isTopContributor")]
    pub is_top_contributor: bool,
}

/// Sort contributors by total pull requests (merged + pending), most first,
/// breaking ties by merged pull requests. Remaining ties keep input order.
///
/// The first `top_count` contributors are tagged as top contributors, and so
/// is anyone past that position who matches the last of them on both total and
/// merged pull requests.
pub fn rank_contributors(contributors: &[Contributor], top_count: usize) -> Vec<SortedContributor> {
    let mut sorted = contributors.to_vec();
    sorted.sort_by(|a, b| {
        b.total_pulls()
            .cmp(&a.total_pulls())
            .then_with(|| b.merged_pulls.cmp(&a.merged_pulls))
    });

    let boundary = top_count
        .min(sorted.len())
        .checked_sub(1)
        .map(|index| (sorted[index].total_pulls(), sorted[index].merged_pulls));

    sorted
        .into_iter()
        .map(|contributor| {
            let is_top_contributor = boundary.is_some_and(|(total, merged)| {
                contributor.total_pulls() >= total && contributor.merged_pulls >= merged
            });
            SortedContributor {
                contributor,
                is_top_contributor,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributor(name: &str, merged_pulls: u64, pending_pulls: u64) -> Contributor {
        Contributor {
            full_name: name.to_string(),
            profile_url: format!("https://github.com/{name}"),
            merged_pulls,
            pending_pulls,
        }
    }

    fn names(ranked: &[SortedContributor]) -> Vec<&str> {
        ranked.iter().map(|c| c.contributor.full_name.as_str()).collect()
    }

    #[test]
    fn test_empty_list() {
        assert!(rank_contributors(&[], DEFAULT_TOP_COUNT).is_empty());
    }

    #[test]
    fn test_sorted_by_total_descending() {
        let contributors = vec![
            contributor("few", 0, 1),
            contributor("many", 1, 3),
            contributor("some", 2, 0),
        ];
        let ranked = rank_contributors(&contributors, DEFAULT_TOP_COUNT);
        assert_eq!(names(&ranked), vec!["many", "some", "few"]);
    }

    #[test]
    fn test_tie_broken_by_merged_count() {
        let contributors = vec![contributor("b", 3, 7), contributor("a", 5, 5)];
        let ranked = rank_contributors(&contributors, DEFAULT_TOP_COUNT);
        assert_eq!(names(&ranked), vec!["a", "b"]);
    }

    #[test]
    fn test_full_ties_keep_input_order() {
        let contributors = vec![contributor("first", 1, 1), contributor("second", 1, 1)];
        let ranked = rank_contributors(&contributors, DEFAULT_TOP_COUNT);
        assert_eq!(names(&ranked), vec!["first", "second"]);
    }

    #[test]
    fn test_fewer_than_top_count_are_all_top() {
        let contributors = vec![contributor("a", 3, 0), contributor("b", 1, 0)];
        let ranked = rank_contributors(&contributors, DEFAULT_TOP_COUNT);
        assert!(ranked.iter().all(|c| c.is_top_contributor));
    }

    #[test]
    fn test_top_count_cuts_off_lower_ranks() {
        let contributors: Vec<Contributor> = (0..15)
            .map(|i| contributor(&format!("user{i}"), 20 - i, 0))
            .collect();
        let ranked = rank_contributors(&contributors, DEFAULT_TOP_COUNT);
        assert_eq!(ranked.iter().filter(|c| c.is_top_contributor).count(), 10);
        assert!(ranked[9].is_top_contributor);
        assert!(!ranked[10].is_top_contributor);
    }

    #[test]
    fn test_ties_with_boundary_are_included() {
        let mut contributors: Vec<Contributor> = (0..9)
            .map(|i| contributor(&format!("user{i}"), 20 - i, 5))
            .collect();
        contributors.push(contributor("tenth", 4, 2));
        contributors.push(contributor("eleventh", 4, 2));
        contributors.push(contributor("twelfth", 3, 3));

        let ranked = rank_contributors(&contributors, DEFAULT_TOP_COUNT);
        assert_eq!(ranked[9].contributor.full_name, "tenth");
        assert_eq!(ranked[10].contributor.full_name, "eleventh");
        assert!(ranked[9].is_top_contributor);
        assert!(ranked[10].is_top_contributor);
        // same total but fewer merged pull requests than the boundary
        assert!(!ranked[11].is_top_contributor);
    }

    #[test]
    fn test_zero_top_count_tags_nobody() {
        let contributors = vec![contributor("a", 3, 0)];
        let ranked = rank_contributors(&contributors, 0);
        assert!(!ranked[0].is_top_contributor);
    }

    #[test]
    fn test_input_untouched() {
        let contributors = vec![contributor("low", 0, 1), contributor("high", 5, 0)];
        let before = contributors.clone();
        rank_contributors(&contributors, DEFAULT_TOP_COUNT);
        assert_eq!(contributors, before);
    }

    #[test]
    fn test_huge_tallies_do_not_overflow() {
        let contributors = vec![
            contributor("small", 3, 4),
            contributor("almost", u64::MAX - 1, 5),
            contributor("max", u64::MAX, 1),
        ];
        let ranked = rank_contributors(&contributors, 1);
        assert_eq!(names(&ranked), vec!["max", "almost", "small"]);
        assert!(ranked[0].is_top_contributor);
        assert!(!ranked[1].is_top_contributor);
        assert!(!ranked[2].is_top_contributor);
    }

    #[test]
    fn test_serializes_top_flag_in_camel_case() {
        let ranked = rank_contributors(&[contributor("octocat", 1, 2)], DEFAULT_TOP_COUNT);
        let value = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(value["full_name"], "octocat");
        assert_eq!(value["merged_pulls"], 1);
        assert_eq!(value["isTopContributor"], true);
    }
}
