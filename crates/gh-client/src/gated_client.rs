//! Admission-gated GitHub API client (decorator pattern)
//!
//! Wraps any `GitHubClient` implementation so that every call holds an
//! `AdmissionGate` permit for exactly the duration of the inner request.

use crate::admission_gate::AdmissionGate;
use crate::client::{GitHubClient, Page};
use crate::types::{PullRequestDetail, PullRequestSummary, RateLimit, Repository};
use async_trait::async_trait;
use std::sync::Arc;

/// GitHub API client bounded by a shared admission gate
///
/// Several clients can share one gate; the gate then bounds the total
/// number of requests in flight across all of them.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{AdmissionGate, GatedGitHubClient, OctocrabClient};
/// use std::sync::Arc;
///
/// let gate = Arc::new(AdmissionGate::new(100));
/// let client = GatedGitHubClient::new(OctocrabClient::from_token(token, None)?, gate);
/// ```
#[derive(Debug, Clone)]
pub struct GatedGitHubClient<C: GitHubClient> {
    inner: C,
    gate: Arc<AdmissionGate>,
}

impl<C: GitHubClient> GatedGitHubClient<C> {
    /// Create a new gated client
    ///
    /// # Arguments
    ///
    /// * `inner` - The inner client to delegate API calls to
    /// * `gate` - Shared admission gate
    pub fn new(inner: C, gate: Arc<AdmissionGate>) -> Self {
        Self { inner, gate }
    }

    /// Get the shared gate
    pub fn gate(&self) -> &Arc<AdmissionGate> {
        &self.gate
    }
}

#[async_trait]
impl<C: GitHubClient> GitHubClient for GatedGitHubClient<C> {
    async fn fetch_repositories_page(
        &self,
        org: &str,
        page: Page,
    ) -> anyhow::Result<Vec<Repository>> {
        let _permit = self.gate.acquire().await;
        self.inner.fetch_repositories_page(org, page).await
    }

    async fn fetch_pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        page: Page,
    ) -> anyhow::Result<Vec<PullRequestSummary>> {
        let _permit = self.gate.acquire().await;
        self.inner.fetch_pull_requests_page(owner, repo, page).await
    }

    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequestDetail> {
        let _permit = self.gate.acquire().await;
        self.inner.fetch_pull_request(owner, repo, pr_number).await
    }

    async fn fetch_rate_limit(&self) -> anyhow::Result<RateLimit> {
        let _permit = self.gate.acquire().await;
        self.inner.fetch_rate_limit().await
    }
}
