//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! Only the fields needed for organization statistics are modelled;
//! everything else in the payloads is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository entry from the organization repository listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name, unique within the organization
    pub name: String,
}

/// A label attached to a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// A pull request as returned by the list endpoint
///
/// The list endpoint omits additions, deletions and commit counts.
/// Use [`PullRequestDetail`] for those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// PR number (e.g., 123)
    pub number: u64,

    /// When the PR was created
    pub created_at: DateTime<Utc>,

    /// Labels attached to the PR
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl PullRequestSummary {
    /// Check whether the PR carries a label with exactly this name
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

/// Size statistics of a single pull request from the detail endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDetail {
    /// PR number
    pub number: u64,

    /// Number of lines added
    pub additions: u64,

    /// Number of lines deleted
    pub deletions: u64,

    /// Number of commits
    pub commits: u64,
}

/// Core API quota as reported by `/rate_limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Requests allowed per window
    pub limit: u64,

    /// Requests left in the current window
    pub remaining: u64,

    /// Requests used in the current window
    #[serde(default)]
    pub used: u64,

    /// When the quota resets
    #[serde(with = "chrono::serde::ts_seconds")]
    pub reset: DateTime<Utc>,
}

/// Envelope of the `/rate_limit` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RateLimitResponse {
    pub rate: RateLimit,
}
