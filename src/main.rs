//! findext — depth-bounded concurrent file finder.
//!
//! Thin binary entry point. All traversal logic lives in the `findext-core`
//! crate; this file parses flags, sets up logging, wires OS signals to the
//! walker's controls and prints the result.

mod cli;
mod signals;

use anyhow::Context;
use clap::Parser;
use findext_core::{CancelToken, FsReader, TargetFile, Walker};
use std::io::Write;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialise structured logging. Results go to stdout, logs to stderr.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(pid = std::process::id(), "findext starting");

    let config = cli.walk_config()?;
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("error when getting current working dir")?,
    };

    let walker = Walker::new(FsReader::new(), config).context("invalid walk configuration")?;
    let cancel = if cli.timeout == 0 {
        CancelToken::new()
    } else {
        CancelToken::with_timeout(Duration::from_secs(cli.timeout))
    };

    let relay = signals::install(walker.clone(), cancel.clone(), cli.depth_step)?;
    let result = walker.find_files(&root, &cli.ext, &cancel);
    relay.close();

    let files = result.context("error on search")?;
    print_files(&files, cli.json)?;

    tracing::info!("Done");
    Ok(())
}

fn print_files(files: &[TargetFile], json: bool) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, files).context("failed to encode results")?;
        writeln!(out)?;
    } else {
        for f in files {
            writeln!(out, "\tName: {}\t\t Path: {}", f.name, f.path.display())?;
        }
    }

    out.flush()?;
    Ok(())
}
