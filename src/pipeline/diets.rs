//! Diets dataset: weight loss by diet.
//!
//! A grouped summary table plus a per-diet relative-frequency histogram over
//! fixed width-2 bins; in chart mode, one histogram image per diet.

use std::path::Path;

use crate::groupby::GroupBy;
use crate::io::csv::read_csv;
use crate::pipeline::{emit_table, run_dataset, stage, PipelineReport, Stage, StageResult};
use crate::schema::{ColumnType, Schema};
use crate::stats::bin_edges;
use crate::table::{fmt_count, fmt_float, Table};

fn schema() -> Schema {
    Schema::new(
        "diets",
        &[
            ("Diet", ColumnType::Categorical),
            ("Wtloss", ColumnType::Float),
        ],
    )
}

/// Fixed histogram tiling: (-6, -4], (-4, -2], ..., (12, 14].
fn wtloss_edges() -> Vec<f64> {
    bin_edges(-6.0, 14.0, 2.0)
}

pub fn run(input: &Path, out_dir: &Path, charts: bool) -> PipelineReport {
    run_dataset("diets", |report| execute(input, out_dir, charts, report))
}

fn execute(
    input: &Path,
    out_dir: &Path,
    charts: bool,
    report: &mut PipelineReport,
) -> StageResult<()> {
    let df = stage(Stage::Load, read_csv(input, &schema()))?;
    let gb = stage(Stage::Aggregate, GroupBy::new(&df, &["Diet"]))?;

    let rows = stage(Stage::Aggregate, gb.summary_by("Wtloss"))?;
    let mut summary = Table::new(["Diet", "Count", "Mean", "Median", "SD", "Min", "Max"]);
    for (key, s) in &rows {
        summary.push_row(vec![
            key[0].to_string(),
            fmt_count(s.count),
            fmt_float(s.mean),
            fmt_float(s.median),
            fmt_float(s.std),
            fmt_float(s.min),
            fmt_float(s.max),
        ]);
    }
    emit_table(&summary, out_dir, "Diet_Summaries.csv", report)?;

    let hist_rows = stage(Stage::Aggregate, gb.histogram_by("Wtloss", &wtloss_edges()))?;
    let mut hist = Table::new(["Diet", "Class", "Frequency", "Relative_Freq"]);
    for row in &hist_rows {
        hist.push_row(vec![
            row.group[0].to_string(),
            row.bin.label(),
            fmt_count(row.frequency),
            fmt_float(row.relative_freq),
        ]);
    }
    emit_table(&hist, out_dir, "Diet_Histogram.csv", report)?;

    if charts {
        render_charts(&gb, out_dir, report);
    }
    Ok(())
}

#[cfg(feature = "visualization")]
fn render_charts(gb: &GroupBy<'_>, out_dir: &Path, report: &mut PipelineReport) {
    use crate::pipeline::emit_chart;
    use crate::vis::{plot_histogram_png, PlotSettings};

    let groups = match gb.values_by("Wtloss") {
        Ok(groups) => groups,
        Err(err) => {
            log::warn!("diets charts skipped: {}", err);
            return;
        }
    };

    let edges = wtloss_edges();
    for (key, values) in &groups {
        let diet = key[0].to_string();
        let path = out_dir.join(format!("Diet{}_Hist.png", diet));
        let settings = PlotSettings::new(
            &format!("Diet {} - Relative Frequency Histogram", diet),
            "Weight Loss (kg)",
            "Frequency",
        );
        emit_chart(
            plot_histogram_png(values, &edges, &path, &settings),
            path,
            report,
        );
    }
}

#[cfg(not(feature = "visualization"))]
fn render_charts(_gb: &GroupBy<'_>, _out_dir: &Path, _report: &mut PipelineReport) {}
