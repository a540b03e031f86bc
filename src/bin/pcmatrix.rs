//! Runs a JSON job description and prints the text report to stdout.

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use env_logger::Env;
use log::info;

use pcmatrix::job::Job;
use pcmatrix::report::TextReporter;

/// Rotate the voice-groups of a canon and score every alignment
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Job description (JSON) naming the rows and search sets
    job: PathBuf,
}

fn run(path: &Path) -> pcmatrix::Result<()> {
    let job = Job::load(path)?;
    let dictionary = job.dictionary()?;
    let mut analyzer = job.build(&dictionary)?;

    let stdout = io::stdout();
    let mut reporter = TextReporter::new(stdout.lock());
    let analysis = analyzer.run_with(&mut reporter)?;

    info!(
        "{} of {} snapshots counted",
        analysis.counted(),
        analysis.rotation_count
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli.job) {
        eprintln!("pcmatrix: {}", err);
        process::exit(1);
    }
}
