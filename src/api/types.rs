use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A label attached to an issue (e.g. "difficulty: easy", "scope: frontend").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
}

/// Author of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// An open issue as served by the `/repo` endpoint.
/// `html_url` is the stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub html_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub node_id: String,
    pub title: String,
    #[serde(default)]
    pub comments: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A repository taking part in the event, with its open issues nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub stars_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub issues: Vec<Issue>,
}

/// Pull request tally for one contributor, as served by `/contrib`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub full_name: String,
    pub profile_url: String,
    pub merged_pulls: u64,
    pub pending_pulls: u64,
}

impl Contributor {
    /// Merged plus pending pull requests, saturating at `u64::MAX`.
    pub fn total_pulls(&self) -> u64 {
        self.merged_pulls.saturating_add(self.pending_pulls)
    }
}
