//! Batch front end: tables only.
//!
//! Runs the five dataset pipelines over a fixed set of input file names and
//! writes one tidy CSV per computed result. Optional positional arguments
//! give the input and output directories; both default to the current
//! directory.

use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    let mut args = env::args().skip(1);
    let input_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| input_dir.clone());

    let reports = tabrs::pipeline::run_all(&input_dir, &output_dir, false);

    let mut failed = false;
    for report in &reports {
        match &report.error {
            None => println!(
                "{}: {} table(s) written",
                report.dataset,
                report.tables.len()
            ),
            Some((stage, err)) => {
                failed = true;
                eprintln!("{}: failed at {} stage: {}", report.dataset, stage, err);
            }
        }
    }

    if failed {
        process::exit(1);
    }
    println!("Done. CSVs saved in {}", output_dir.display());
}
