//! GitHub API client with admission control
//!
//! This crate provides a trait-based GitHub API client whose requests are
//! bounded by a shared admission gate. The design follows the decorator
//! pattern: the gate is composed with the base client rather than built
//! into it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_repositories_page()                     │
//! │  - fetch_pull_requests_page()                    │
//! │  - fetch_pull_request()                          │
//! │  - fetch_rate_limit()                            │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ OctocrabClient  │         │ GatedGitHubClient   │──► AdmissionGate
//! │ (direct API)    │◄────────│ (decorator)         │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! Collections are drained with [`pager::fetch_all`].
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{pager, AdmissionGate, GatedGitHubClient, GitHubClient, OctocrabClient};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let gate = Arc::new(AdmissionGate::new(100));
//! let client = GatedGitHubClient::new(OctocrabClient::from_token("token", None)?, gate);
//!
//! let repos = pager::fetch_all(|page| client.fetch_repositories_page("rust-lang", page)).await?;
//! # Ok(())
//! # }
//! ```

pub mod admission_gate;
pub mod client;
pub mod gated_client;
pub mod octocrab_client;
pub mod pager;
pub mod types;

pub use admission_gate::{AdmissionGate, AdmissionPermit, DEFAULT_MAX_IN_FLIGHT};
pub use client::{GitHubClient, Page, FIRST_PAGE, PER_PAGE};
pub use gated_client::GatedGitHubClient;
pub use octocrab_client::OctocrabClient;
pub use types::{Label, PullRequestDetail, PullRequestSummary, RateLimit, Repository};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
