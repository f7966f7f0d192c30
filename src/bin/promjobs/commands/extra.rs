use super::{load_document, print_json, Source};
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct Arguments {
    #[command(flatten)]
    source: Source,
    /// Pretty print the resulting JSON (defaults to false)
    #[arg(short, long, default_value = "false")]
    pretty: bool,
}

pub fn handle_command(args: Arguments) -> Result<()> {
    let document = load_document(&args.source.file)?;
    print_json(&document.extra, args.pretty)
}
