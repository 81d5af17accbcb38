//! Per-dataset batch pipelines.
//!
//! Each of the five datasets runs as an independent pipeline
//! (load → clean → group → aggregate → emit) with no state shared with any
//! other pipeline. [`run_all`] executes all five and collects one
//! [`PipelineReport`] each: a failed pipeline names the dataset and the stage
//! that failed, and never stops the others.

pub mod brandprefs;
pub mod designs;
pub mod diets;
pub mod heather;
pub mod superplus;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::io::csv;
use crate::table::Table;

/// Stage of a dataset pipeline, reported on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Clean,
    Aggregate,
    Write,
    Chart,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Clean => "clean",
            Stage::Aggregate => "aggregate",
            Stage::Write => "write",
            Stage::Chart => "chart",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of one dataset pipeline.
#[derive(Debug)]
pub struct PipelineReport {
    pub dataset: &'static str,
    /// Tables written, in output order.
    pub tables: Vec<PathBuf>,
    /// Chart images written (chart mode only).
    pub charts: Vec<PathBuf>,
    /// The failing stage and error, when the pipeline aborted.
    pub error: Option<(Stage, Error)>,
}

impl PipelineReport {
    fn new(dataset: &'static str) -> Self {
        PipelineReport {
            dataset,
            tables: Vec::new(),
            charts: Vec::new(),
            error: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of one pipeline step, tagged with the stage it belongs to.
pub(crate) type StageResult<T> = std::result::Result<T, (Stage, Error)>;

pub(crate) fn stage<T>(at: Stage, result: Result<T>) -> StageResult<T> {
    result.map_err(|e| (at, e))
}

/// Write one tidy table into the output directory and record it.
pub(crate) fn emit_table(
    table: &Table,
    out_dir: &Path,
    name: &str,
    report: &mut PipelineReport,
) -> StageResult<()> {
    let path = out_dir.join(name);
    stage(Stage::Write, csv::write_table(table, &path))?;
    log::info!("wrote {} ({} rows)", path.display(), table.len());
    report.tables.push(path);
    Ok(())
}

/// Record a chart attempt. Chart failures degrade to a warning: tables and
/// charts are independent consumers of the same computed rows.
#[cfg(feature = "visualization")]
pub(crate) fn emit_chart(result: Result<()>, path: PathBuf, report: &mut PipelineReport) {
    match result {
        Ok(()) => {
            log::info!("wrote {}", path.display());
            report.charts.push(path);
        }
        Err(err) => log::warn!("chart {} failed: {}", path.display(), err),
    }
}

/// Wrap a dataset's `execute` body into a report.
fn run_dataset<F>(dataset: &'static str, body: F) -> PipelineReport
where
    F: FnOnce(&mut PipelineReport) -> StageResult<()>,
{
    let mut report = PipelineReport::new(dataset);
    if let Err((at, err)) = body(&mut report) {
        log::warn!("{} pipeline failed at {} stage: {}", dataset, at, err);
        report.error = Some((at, err));
    }
    report
}

/// Run all five dataset pipelines over a fixed, named set of input files.
///
/// `charts` additionally renders the chart images when the crate is built
/// with the `visualization` feature; without it the flag logs a warning and
/// the tables are still produced.
pub fn run_all(input_dir: &Path, output_dir: &Path, charts: bool) -> Vec<PipelineReport> {
    #[cfg(not(feature = "visualization"))]
    if charts {
        log::warn!("chart mode requested but tabrs was built without the 'visualization' feature");
    }

    vec![
        superplus::run(&input_dir.join("Superplus.csv"), output_dir, charts),
        heather::run(&input_dir.join("Heather.csv"), output_dir, charts),
        diets::run(&input_dir.join("Diets.csv"), output_dir, charts),
        designs::run(&input_dir.join("Designs.csv"), output_dir, charts),
        brandprefs::run(&input_dir.join("Brandprefs.csv"), output_dir, charts),
    ]
}
