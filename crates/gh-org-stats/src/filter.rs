//! Pull request selection

use chrono::{DateTime, Utc};
use gh_client::PullRequestSummary;
use gh_org_stats_config::StatsConfig;

/// Which pull requests count towards the statistics
///
/// An unset criterion always passes; set criteria must all hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive lower bound on the creation time
    pub since: Option<DateTime<Utc>>,
    /// Label the pull request must carry
    pub label: Option<String>,
}

impl FilterCriteria {
    pub fn new(since: Option<DateTime<Utc>>, label: Option<String>) -> Self {
        Self { since, label }
    }

    pub fn from_config(config: &StatsConfig) -> Self {
        Self::new(config.since, config.label.clone())
    }

    /// Check whether a pull request passes all set criteria
    pub fn matches(&self, pr: &PullRequestSummary) -> bool {
        let created_in_range = self.since.map_or(true, |since| pr.created_at >= since);
        let labelled = self.label.as_deref().map_or(true, |label| pr.has_label(label));
        created_in_range && labelled
    }
}
