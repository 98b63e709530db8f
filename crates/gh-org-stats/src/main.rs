use anyhow::{Context, Result};
use gh_client::{octocrab, AdmissionGate, GatedGitHubClient, OctocrabClient};
use gh_org_stats_config::StatsConfig;
use std::sync::Arc;

mod filter;
mod logger;
mod output_log;
mod runner;
mod statistics;

#[cfg(test)]
mod test_support;

use filter::FilterCriteria;
use output_log::OutputLog;
use runner::Runner;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    log::info!("Starting gh-org-stats");

    let config = StatsConfig::load()?;
    log::debug!("Configuration: {:?}", config);

    let gate = Arc::new(AdmissionGate::new(config.max_in_flight));
    let octocrab_client =
        OctocrabClient::from_token(config.access_token.clone(), config.api_url.as_deref())
            .context("Failed to initialize GitHub client")?;
    let client = GatedGitHubClient::new(octocrab_client, gate);

    let mut runner = Runner::new(
        &client,
        config.organization.clone(),
        FilterCriteria::from_config(&config),
        OutputLog::new(&config.output_file),
    );

    // Failures stop the run but not the process; unfinished repositories
    // are picked up by the next run.
    match runner.run().await {
        Ok(summary) => log::info!(
            "Run finished: {} repositories, {} processed, {} skipped",
            summary.total,
            summary.processed,
            summary.skipped
        ),
        Err(err) => report_failure(&err),
    }
    log::debug!("Final run state: {:?}", runner.state());

    println!("See {} for result.", runner.output().path().display());

    log::info!("Exiting gh-org-stats");
    Ok(())
}

/// Print the error chain and, for GitHub API errors, the error payload
fn report_failure(err: &anyhow::Error) {
    log::error!("Run aborted: {:#}", err);

    eprintln!("Error: {}", err);
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {}", cause);
    }

    let github_error = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<octocrab::Error>())
        .find_map(|e| match e {
            octocrab::Error::GitHub { source, .. } => Some(source),
            _ => None,
        });
    if let Some(source) = github_error {
        eprintln!("{:#?}", source);
    }
}
