//! Statistics run controller
//!
//! Drives one run over an organization:
//!
//! ```text
//! NotStarted → RateChecked → Listing → ProcessingRepo* → Done
//!                   └───────────┴────────────┴──────────→ Aborted
//! ```
//!
//! Repositories are processed one after another; a repository's row is
//! written before the next repository starts. The first failure aborts the
//! run, leaving the remaining repositories for the next run.

use crate::filter::FilterCriteria;
use crate::output_log::{pending, OutputLog};
use crate::statistics::{collect_statistics, list_repositories, RepoStatistics};
use anyhow::{Context, Result};
use gh_client::GitHubClient;
use log::{debug, info};

/// Where a run currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    RateChecked,
    Listing,
    ProcessingRepo(String),
    Done,
    Aborted,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Repositories in the organization
    pub total: usize,
    /// Repositories skipped because the log already has them
    pub skipped: usize,
    /// Repositories processed in this run
    pub processed: usize,
}

pub struct Runner<'a> {
    client: &'a dyn GitHubClient,
    organization: String,
    criteria: FilterCriteria,
    output: OutputLog,
    state: RunState,
}

impl<'a> Runner<'a> {
    pub fn new(
        client: &'a dyn GitHubClient,
        organization: impl Into<String>,
        criteria: FilterCriteria,
        output: OutputLog,
    ) -> Self {
        Self {
            client,
            organization: organization.into(),
            criteria,
            output,
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    /// Run over all unfinished repositories
    pub async fn run(&mut self) -> Result<RunSummary> {
        let result = self.run_to_completion().await;
        if result.is_err() {
            self.transition(RunState::Aborted);
        }
        result
    }

    async fn run_to_completion(&mut self) -> Result<RunSummary> {
        let finished = self.output.finished_repositories()?;

        let rate = self
            .client
            .fetch_rate_limit()
            .await
            .context("Failed to check API quota")?;
        info!(
            "API quota: {}/{} requests remaining, resets at {}",
            rate.remaining, rate.limit, rate.reset
        );
        self.transition(RunState::RateChecked);

        self.transition(RunState::Listing);
        let all = list_repositories(self.client, &self.organization).await?;
        let left = pending(&all, &finished);

        println!("Found {} repos, {} left", all.len(), left.len());
        println!("{}", RepoStatistics::HEADER);

        let mut summary = RunSummary {
            total: all.len(),
            skipped: all.len() - left.len(),
            processed: 0,
        };

        for repo in left {
            self.transition(RunState::ProcessingRepo(repo.clone()));

            let stats = collect_statistics(self.client, &self.organization, &repo, &self.criteria)
                .await
                .with_context(|| format!("Failed to collect statistics for {}", repo))?;
            self.output.append(&stats)?;

            println!("{}", stats);
            summary.processed += 1;
        }

        self.transition(RunState::Done);
        Ok(summary)
    }

    fn transition(&mut self, next: RunState) {
        debug!("Run state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
