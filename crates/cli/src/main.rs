//! Themis CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: flags, environment variables, and GitHub
//!    Actions inputs, resolved into [`config::Settings`].
//! 2. **Wire observability**: configure `tracing-subscriber` (text or JSON on
//!    stderr) and, when an OTLP endpoint is configured, an OpenTelemetry
//!    exporter.
//! 3. **Build the run context**: repository, pull request number, and commit
//!    from the settings and the runner's event payload.
//! 4. **Construct infrastructure**: a [`github::GitHubGateway`] injected into
//!    the evaluation driver.
//! 5. **Report**: workflow-command annotations, the job summary, and the
//!    process exit code (0 when every enabled check passed, 1 otherwise).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use checks::EvaluationReport;
use clap::Parser;
use github::{GatewayConfig, GitHubGateway};
use policy::{EvaluationRunId, PullRequestContext, ThemisError};
use tracing::{debug, error, info, warn};

mod config;
mod event;
mod report;
mod telemetry;

use config::{Cli, Settings};

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Cli::parse().resolve(|name| std::env::var(name).ok()) {
        Ok(settings) => settings,
        Err(e) => {
            println!("::error title=themis::{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _telemetry = match telemetry::init(settings.debug, settings.log_format) {
        Ok(guard) => guard,
        Err(e) => {
            println!("::error title=themis::failed to initialise logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(settings).await {
        Ok(report) => finish(&report),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Evaluation could not start");
            println!("::error title=themis::{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> anyhow::Result<EvaluationReport> {
    let run_id = EvaluationRunId::new_random();
    let pr = pull_request_context(&settings)?;
    info!(
        run_id = %run_id,
        repo = %settings.repo,
        issue = %pr.issue_number,
        commit = %pr.commit_sha,
        "Starting evaluation"
    );

    let policy = settings.policy.compile();

    let gateway = GitHubGateway::new(GatewayConfig {
        api_url: settings.api_url.clone(),
        graphql_url: settings.graphql_url.clone(),
        token: settings.token.clone(),
        repository: settings.repo.clone(),
        issues_url_template: pr.issues_base_url.clone(),
    })
    .context("failed to construct the GitHub gateway")?;

    Ok(checks::evaluate(&gateway, &policy, &settings.repo, &pr, run_id).await)
}

/// Combines explicit settings with the runner's event payload.
///
/// The payload's head SHA is preferred over `GITHUB_SHA`, which names the
/// merge commit on `pull_request` events.
fn pull_request_context(settings: &Settings) -> Result<PullRequestContext, ThemisError> {
    let event = match &settings.event_path {
        Some(path) => event::load(path)?,
        None => event::EventContext::default(),
    };

    let issue_number = settings
        .issue_number
        .or(event.issue_number)
        .ok_or_else(|| ThemisError::MissingContext {
            message: "no pull request number in the event payload or THEMIS_ISSUE_NUMBER"
                .to_string(),
        })?;

    let commit_sha = event
        .head_sha
        .or_else(|| settings.sha.clone())
        .ok_or_else(|| ThemisError::MissingContext {
            message: "no commit SHA in the event payload or GITHUB_SHA".to_string(),
        })?;

    Ok(PullRequestContext {
        issue_number,
        commit_sha,
        issues_base_url: event.issues_url,
    })
}

fn finish(report: &EvaluationReport) -> ExitCode {
    match report::render_json(report) {
        Ok(json) => debug!(report = %json, "Evaluation report"),
        Err(e) => warn!(error = %e, "Failed to serialise evaluation report"),
    }

    for line in report::annotations(report) {
        println!("{line}");
    }

    if let Some(path) = std::env::var_os("GITHUB_STEP_SUMMARY").map(PathBuf::from) {
        if let Err(e) = report::append_summary(&path, report) {
            warn!(path = %path.display(), error = %e, "Failed to write job summary");
        }
    }

    match report.failure_summary() {
        None => {
            info!(run_id = %report.run_id, "All enabled policy checks passed");
            ExitCode::SUCCESS
        }
        Some(summary) => {
            error!(run_id = %report.run_id, "{summary}");
            eprintln!("{summary}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
