use super::{load_document, Source};
use anyhow::Result;
use clap::Args;
use promjobs_config::Document;
use std::io::{self, Write};

#[derive(Args)]
pub struct Arguments {
    #[command(flatten)]
    source: Source,
}

pub fn handle_command(args: Arguments) -> Result<()> {
    let document = load_document(&args.source.file)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_prompts(&document, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Write the job name, followed by one prompt line per target of the job.
pub(crate) fn write_prompts<W: Write>(document: &Document, out: &mut W) -> io::Result<()> {
    for job in &document.jobs {
        writeln!(out, "{}", job.job_name)?;

        for target in job.targets() {
            writeln!(
                out,
                "For job '{}', target {} what would you like to do",
                job.job_name, target
            )?;
        }
    }

    Ok(())
}
