//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! Requests are issued as routed GETs and deserialized into this crate's own
//! DTOs. There is no admission control here; wrap the client in
//! `GatedGitHubClient` for that.

use crate::client::{GitHubClient, Page};
use crate::types::{
    PullRequestDetail, PullRequestSummary, RateLimit, RateLimitResponse, Repository,
};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Query parameters of paginated list endpoints
#[derive(Debug, Serialize)]
struct ListParams {
    per_page: u8,
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'static str>,
}

impl ListParams {
    fn new(page: Page) -> Self {
        Self {
            per_page: page.per_page,
            page: page.number,
            state: None,
        }
    }

    fn with_state(mut self, state: &'static str) -> Self {
        self.state = Some(state);
        self
    }
}

/// Direct GitHub API client using octocrab
///
/// This is the base implementation that makes actual API calls.
/// It is meant to be wrapped by `GatedGitHubClient`.
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Build a client authenticating with a bearer token
    ///
    /// # Arguments
    ///
    /// * `token` - Personal access token
    /// * `base_uri` - Optional API base (e.g. `https://ghe.example.com/api/v3`),
    ///   defaults to `https://api.github.com`
    pub fn from_token(token: impl Into<String>, base_uri: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.into());

        if let Some(uri) = base_uri {
            builder = builder.base_uri(uri).context("Failed to set base URI")?;
        }

        let octocrab = builder.build().context("Failed to build Octocrab client")?;
        Ok(Self::new(Arc::new(octocrab)))
    }

    async fn get<R, P>(&self, route: String, params: Option<&P>) -> anyhow::Result<R>
    where
        R: DeserializeOwned + Send,
        P: Serialize + ?Sized,
    {
        debug!("GET {}", route);
        self.octocrab
            .get(&route, params)
            .await
            .map_err(|e| upstream_error(&route, e))
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_repositories_page(
        &self,
        org: &str,
        page: Page,
    ) -> anyhow::Result<Vec<Repository>> {
        let route = format!("/orgs/{}/repos", org);
        self.get(route, Some(&ListParams::new(page))).await
    }

    async fn fetch_pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        page: Page,
    ) -> anyhow::Result<Vec<PullRequestSummary>> {
        let route = format!("/repos/{}/{}/pulls", owner, repo);
        let params = ListParams::new(page).with_state("all");
        self.get(route, Some(&params)).await
    }

    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequestDetail> {
        let route = format!("/repos/{}/{}/pulls/{}", owner, repo, pr_number);
        self.get(route, None::<&()>).await
    }

    async fn fetch_rate_limit(&self) -> anyhow::Result<RateLimit> {
        let response: RateLimitResponse = self.get("/rate_limit".to_string(), None::<&()>).await?;
        Ok(response.rate)
    }
}

/// Wrap an octocrab error with the route and, for API errors, GitHub's
/// own message and documentation link
fn upstream_error(route: &str, err: octocrab::Error) -> anyhow::Error {
    let summary = match &err {
        octocrab::Error::GitHub { source, .. } => {
            describe_github_error(&source.message, source.documentation_url.as_deref())
        }
        _ => "request failed".to_string(),
    };
    anyhow::Error::new(err).context(format!("GET {}: {}", route, summary))
}

fn describe_github_error(message: &str, documentation_url: Option<&str>) -> String {
    match documentation_url {
        Some(url) => format!("{} (see {})", message, url),
        None => message.to_string(),
    }
}
