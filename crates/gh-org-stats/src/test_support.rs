//! In-memory GitHub API for tests

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use gh_client::{
    GitHubClient, Label, Page, PullRequestDetail, PullRequestSummary, RateLimit, Repository,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock organization served page by page
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    repos: Vec<String>,
    pulls: HashMap<String, Vec<PullRequestSummary>>,
    details: HashMap<(String, u64), PullRequestDetail>,
    failing_details: HashSet<(String, u64)>,
    fail_rate_limit: bool,
    calls: Arc<Mutex<Vec<String>>>,
    active_details: Arc<AtomicUsize>,
    peak_details: Arc<AtomicUsize>,
}

impl MockClient {
    pub fn with_repos(repos: &[&str]) -> Self {
        Self {
            repos: repos.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Add a pull request with its (additions, deletions, commits)
    pub fn with_pull(
        mut self,
        repo: &str,
        number: u64,
        created_at: DateTime<Utc>,
        labels: &[&str],
        (additions, deletions, commits): (u64, u64, u64),
    ) -> Self {
        self.pulls
            .entry(repo.to_string())
            .or_default()
            .push(PullRequestSummary {
                number,
                created_at,
                labels: labels
                    .iter()
                    .map(|name| Label {
                        name: name.to_string(),
                    })
                    .collect(),
            });
        self.details.insert(
            (repo.to_string(), number),
            PullRequestDetail {
                number,
                additions,
                deletions,
                commits,
            },
        );
        self
    }

    pub fn failing_detail(mut self, repo: &str, number: u64) -> Self {
        self.failing_details.insert((repo.to_string(), number));
        self
    }

    pub fn failing_rate_limit(mut self) -> Self {
        self.fail_rate_limit = true;
        self
    }

    /// Every request made so far, e.g. `pulls:A:page=1` or `pull:A#2`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    /// Most detail fetches observed running at the same time
    pub fn peak_detail_fetches(&self) -> usize {
        self.peak_details.load(Ordering::SeqCst)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Slice out the items belonging to a page
fn page_of<T: Clone>(items: &[T], page: Page) -> Vec<T> {
    let per_page = page.per_page as usize;
    let start = (page.number as usize - 1) * per_page;
    items.iter().skip(start).take(per_page).cloned().collect()
}

/// A fixed creation date in May 2024
pub fn may(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
}

#[async_trait]
impl GitHubClient for MockClient {
    async fn fetch_repositories_page(
        &self,
        org: &str,
        page: Page,
    ) -> anyhow::Result<Vec<Repository>> {
        self.record(format!("repos:{}:page={}", org, page.number));
        Ok(page_of(&self.repos, page)
            .into_iter()
            .map(|name| Repository { name })
            .collect())
    }

    async fn fetch_pull_requests_page(
        &self,
        _owner: &str,
        repo: &str,
        page: Page,
    ) -> anyhow::Result<Vec<PullRequestSummary>> {
        self.record(format!("pulls:{}:page={}", repo, page.number));
        Ok(self
            .pulls
            .get(repo)
            .map(|pulls| page_of(pulls, page))
            .unwrap_or_default())
    }

    async fn fetch_pull_request(
        &self,
        _owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequestDetail> {
        self.record(format!("pull:{}#{}", repo, pr_number));
        let now = self.active_details.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_details.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.active_details.fetch_sub(1, Ordering::SeqCst);

        let key = (repo.to_string(), pr_number);
        if self.failing_details.contains(&key) {
            anyhow::bail!("502 Bad Gateway");
        }
        self.details
            .get(&key)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("PR not found"))
    }

    async fn fetch_rate_limit(&self) -> anyhow::Result<RateLimit> {
        self.record("rate_limit".to_string());
        if self.fail_rate_limit {
            anyhow::bail!("Bad credentials");
        }
        Ok(RateLimit {
            limit: 5000,
            remaining: 4321,
            used: 679,
            reset: may(31),
        })
    }
}
