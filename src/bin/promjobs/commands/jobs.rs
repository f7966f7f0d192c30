use super::{load_document, print_json, Source};
use anyhow::Result;
use clap::Args;
use promjobs_config::prometheus::DurationError;
use promjobs_config::{Document, Job};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Args)]
pub struct Arguments {
    #[command(flatten)]
    source: Source,
    /// Pretty print the resulting JSON (defaults to false)
    #[arg(short, long, default_value = "false")]
    pretty: bool,
}

/// What a job ends up doing once the global defaults are applied.
#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct JobSummary<'a> {
    job_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    modules: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scrape_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scrape_timeout: Option<String>,
    relabel_rules: usize,
    target_groups: usize,
    targets: usize,
}

pub fn handle_command(args: Arguments) -> Result<()> {
    let document = load_document(&args.source.file)?;

    let res = summarize(&document);
    print_json(&res, args.pretty)?;
    info!("Total: {} jobs", res.len());

    Ok(())
}

pub(crate) fn summarize(document: &Document) -> Vec<JobSummary<'_>> {
    document
        .jobs
        .iter()
        .map(|job| JobSummary {
            job_name: &job.job_name,
            metrics_path: job.metrics_path.as_deref(),
            modules: job.params.module.iter().map(String::as_str).collect(),
            scrape_interval: display_duration(
                job,
                "scrape_interval",
                job.effective_scrape_interval(&document.global),
                job.scrape_interval_duration(&document.global),
            ),
            scrape_timeout: display_duration(
                job,
                "scrape_timeout",
                job.effective_scrape_timeout(&document.global),
                job.scrape_timeout_duration(&document.global),
            ),
            relabel_rules: job.relabel_configs.len(),
            target_groups: job.static_configs.len(),
            targets: job.targets().count(),
        })
        .collect()
}

/// Normalize a duration for display, keeping the raw text when it does not
/// parse.
fn display_duration(
    job: &Job,
    field: &str,
    raw: Option<&str>,
    parsed: Result<Option<Duration>, DurationError>,
) -> Option<String> {
    match parsed {
        Ok(duration) => duration.map(|duration| humantime::format_duration(duration).to_string()),
        Err(err) => {
            warn!(job = %job.job_name, field, %err, "Unable to parse duration");
            raw.map(str::to_string)
        }
    }
}
