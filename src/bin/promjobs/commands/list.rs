use super::{load_document, print_json, Source};
use anyhow::Result;
use clap::Args;
use promjobs_config::Document;
use serde::Serialize;
use tracing::info;

#[derive(Args)]
pub struct Arguments {
    #[command(flatten)]
    source: Source,
    /// Pretty print the resulting JSON (defaults to false)
    #[arg(short, long, default_value = "false")]
    pretty: bool,
}

#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct ScrapeTarget<'a> {
    job: &'a str,
    target: &'a str,
}

pub fn handle_command(args: Arguments) -> Result<()> {
    let document = load_document(&args.source.file)?;

    let res = scrape_targets(&document);
    print_json(&res, args.pretty)?;
    info!("Total: {} targets", res.len());

    Ok(())
}

pub(crate) fn scrape_targets(document: &Document) -> Vec<ScrapeTarget<'_>> {
    promjobs_config::targets(document)
        .map(|(job, target)| ScrapeTarget { job, target })
        .collect()
}
