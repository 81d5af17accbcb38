//! Batch front end: tables plus chart images.
//!
//! Same fixed batch run as `tabrs-tables`, additionally rendering each
//! computed result as a PNG. A chart that fails to render is reported as a
//! warning; the tables are written regardless.

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

    let reports = tabrs::pipeline::run_all(&input_dir, &output_dir, true);

    let mut failed = false;
    for report in &reports {
        match &report.error {
            None => println!(
                "{}: {} table(s), {} chart(s) written",
                report.dataset,
                report.tables.len(),
                report.charts.len()
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
    println!("Done. CSVs and PNGs saved in {}", output_dir.display());
}
