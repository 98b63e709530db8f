//! Repository listing and per-repository pull request statistics

use crate::filter::FilterCriteria;
use anyhow::{Context, Result};
use futures::future::try_join_all;
use gh_client::{pager, GitHubClient, PullRequestDetail};
use log::debug;
use std::fmt;

/// Aggregated pull request numbers of one repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoStatistics {
    pub repo: String,
    pub pull_count: u64,
    pub commit_total: u64,
    pub addition_total: u64,
    pub deletion_total: u64,
}

impl RepoStatistics {
    /// Column header matching the `Display` row layout
    pub const HEADER: &'static str = "repo\t#pulls\t#commits\t#additions\t#deletions";

    /// Sum up the details of all counted pull requests
    pub fn aggregate(repo: impl Into<String>, details: &[PullRequestDetail]) -> Self {
        details.iter().fold(
            Self {
                repo: repo.into(),
                ..Self::default()
            },
            |mut stats, detail| {
                stats.pull_count += 1;
                stats.commit_total += detail.commits;
                stats.addition_total += detail.additions;
                stats.deletion_total += detail.deletions;
                stats
            },
        )
    }
}

impl fmt::Display for RepoStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.repo, self.pull_count, self.commit_total, self.addition_total, self.deletion_total
        )
    }
}

/// List the names of all repositories of an organization
pub async fn list_repositories(client: &dyn GitHubClient, org: &str) -> Result<Vec<String>> {
    let repos = pager::fetch_all(|page| client.fetch_repositories_page(org, page))
        .await
        .with_context(|| format!("Failed to list repositories of {}", org))?;

    debug!("Organization {} has {} repositories", org, repos.len());
    Ok(repos.into_iter().map(|repo| repo.name).collect())
}

/// Collect statistics over the pull requests of one repository
///
/// Details of all matching pull requests are fetched concurrently; how many
/// run at once is up to the client's admission gate. If any detail fetch
/// fails the whole repository fails and nothing is aggregated.
pub async fn collect_statistics(
    client: &dyn GitHubClient,
    owner: &str,
    repo: &str,
    criteria: &FilterCriteria,
) -> Result<RepoStatistics> {
    let pulls = pager::fetch_all(|page| client.fetch_pull_requests_page(owner, repo, page))
        .await
        .with_context(|| format!("Failed to list pull requests of {}", repo))?;

    let matching: Vec<u64> = pulls
        .iter()
        .filter(|pr| criteria.matches(pr))
        .map(|pr| pr.number)
        .collect();
    debug!(
        "{}: {} of {} pull requests match the filter",
        repo,
        matching.len(),
        pulls.len()
    );

    let details = try_join_all(matching.iter().map(|&number| async move {
        client
            .fetch_pull_request(owner, repo, number)
            .await
            .with_context(|| {
                format!(
                    "Failed to fetch details of pull request #{} in {}",
                    number, repo
                )
            })
    }))
    .await?;

    Ok(RepoStatistics::aggregate(repo, &details))
}
