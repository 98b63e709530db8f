//! GitHub client trait and page addressing
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy, as well as the `Page` type used by
//! the paginated listing methods.

use crate::types::{PullRequestDetail, PullRequestSummary, RateLimit, Repository};
use async_trait::async_trait;

/// Fixed page size for all paginated listings
pub const PER_PAGE: u8 = 100;

/// Index of the first page (GitHub pages are 1-based)
pub const FIRST_PAGE: u32 = 1;

/// A single page of a paginated collection endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page index
    pub number: u32,
    /// Items per page
    pub per_page: u8,
}

impl Page {
    /// The first page with the default page size
    pub fn first() -> Self {
        Self {
            number: FIRST_PAGE,
            per_page: PER_PAGE,
        }
    }

    /// The page following this one
    pub fn next(self) -> Self {
        Self {
            number: self.number + 1,
            ..self
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first()
    }
}

/// GitHub API client trait
///
/// Defines the interface for interacting with the GitHub API.
/// Implementations can be direct (hitting the API) or decorated
/// with admission control, logging, etc.
///
/// Listing methods return a single page; use [`crate::pager::fetch_all`]
/// to drain a whole collection.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{pager, GitHubClient};
///
/// async fn repo_names(client: &dyn GitHubClient) -> anyhow::Result<Vec<String>> {
///     let repos = pager::fetch_all(|page| client.fetch_repositories_page("rust-lang", page)).await?;
///     Ok(repos.into_iter().map(|r| r.name).collect())
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch one page of an organization's repositories
    ///
    /// # Arguments
    ///
    /// * `org` - Organization name
    /// * `page` - Page to fetch
    async fn fetch_repositories_page(
        &self,
        org: &str,
        page: Page,
    ) -> anyhow::Result<Vec<Repository>>;

    /// Fetch one page of a repository's pull requests in any state
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner (user or organization)
    /// * `repo` - Repository name
    /// * `page` - Page to fetch
    async fn fetch_pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        page: Page,
    ) -> anyhow::Result<Vec<PullRequestSummary>>;

    /// Fetch a single pull request by number
    ///
    /// This returns additions/deletions/commits which are not
    /// available in the list endpoint.
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequestDetail>;

    /// Fetch the core API quota
    async fn fetch_rate_limit(&self) -> anyhow::Result<RateLimit>;
}
