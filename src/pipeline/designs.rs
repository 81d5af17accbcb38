//! Designs dataset: units sold per store under two designs.
//!
//! A flat (ungrouped) per-column summary of the two paired measures, plus the
//! original records augmented with their per-store difference. In chart mode,
//! a clustered per-store bar and a mean comparison bar.

use std::path::Path;

use crate::frame::DataFrame;
use crate::io::csv::read_csv;
use crate::pipeline::{emit_table, run_dataset, stage, PipelineReport, Stage, StageResult};
use crate::schema::{ColumnType, Schema};
use crate::stats::{column_summary, SummaryStats};
use crate::table::{fmt_cell, fmt_float, Table};

fn schema() -> Schema {
    Schema::new(
        "designs",
        &[
            ("Store", ColumnType::Int),
            ("Con1", ColumnType::Int),
            ("Con2", ColumnType::Int),
        ],
    )
}

pub fn run(input: &Path, out_dir: &Path, charts: bool) -> PipelineReport {
    run_dataset("designs", |report| execute(input, out_dir, charts, report))
}

fn execute(
    input: &Path,
    out_dir: &Path,
    charts: bool,
    report: &mut PipelineReport,
) -> StageResult<()> {
    let mut df = stage(Stage::Load, read_csv(input, &schema()))?;

    let stats = stage(Stage::Aggregate, column_summary(&df, &["Con1", "Con2"]))?;
    let picks: [(&str, fn(&SummaryStats) -> f64); 5] = [
        ("mean", |s| s.mean),
        ("median", |s| s.median),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("max", |s| s.max),
    ];
    let mut summary = Table::new(["", "Con1", "Con2"]);
    for (name, pick) in picks {
        let mut row = vec![name.to_string()];
        row.extend(stats.iter().map(|(_, s)| fmt_float(pick(s))));
        summary.push_row(row);
    }
    emit_table(&summary, out_dir, "Designs_Summary.csv", report)?;

    // Per-record difference, order preserving, all original fields kept.
    let diff = stage(Stage::Aggregate, df.pairwise_difference("Con1", "Con2"))?;
    stage(Stage::Aggregate, df.add_column("Diff".to_string(), diff))?;

    let mut differences = Table::new(["Store", "Con1", "Con2", "Diff"]);
    let columns: Vec<&[Option<crate::frame::Value>]> = ["Store", "Con1", "Con2", "Diff"]
        .iter()
        .map(|&name| stage(Stage::Aggregate, df.column(name)))
        .collect::<StageResult<_>>()?;
    for i in 0..df.row_count() {
        differences.push_row(columns.iter().map(|col| fmt_cell(&col[i])).collect());
    }
    emit_table(&differences, out_dir, "Designs_Differences.csv", report)?;

    if charts {
        render_charts(&df, out_dir, report);
    }
    Ok(())
}

#[cfg(feature = "visualization")]
fn render_charts(df: &DataFrame, out_dir: &Path, report: &mut PipelineReport) {
    use crate::pipeline::emit_chart;
    use crate::stats;
    use crate::vis::{plot_bar_png, plot_grouped_bar_png, PlotSettings};

    let (stores, con1, con2) = match (
        df.column("Store"),
        df.f64_column("Con1"),
        df.f64_column("Con2"),
    ) {
        (Ok(stores), Ok(con1), Ok(con2)) => (stores, con1, con2),
        _ => {
            log::warn!("designs charts skipped: column access failed");
            return;
        }
    };
    if stores.is_empty() {
        return;
    }

    let labels: Vec<String> = stores
        .iter()
        .map(|c| c.as_ref().map(|v| v.to_string()).unwrap_or_default())
        .collect();
    let series = vec![
        (
            "Con1".to_string(),
            con1.iter().map(|v| v.unwrap_or(f64::NAN)).collect::<Vec<_>>(),
        ),
        (
            "Con2".to_string(),
            con2.iter().map(|v| v.unwrap_or(f64::NAN)).collect::<Vec<_>>(),
        ),
    ];

    let path = out_dir.join("Designs_ByStore.png");
    let settings = PlotSettings::new("Designs - Sales by Store (Con1 vs Con2)", "Store", "Units Sold");
    emit_chart(
        plot_grouped_bar_png(&labels, &series, &path, &settings),
        path,
        report,
    );

    let mean1 = stats::summary(con1.iter().flatten().copied().collect::<Vec<_>>()).mean;
    let mean2 = stats::summary(con2.iter().flatten().copied().collect::<Vec<_>>()).mean;
    let path = out_dir.join("Designs_Mean.png");
    let settings = PlotSettings::new("Designs - Mean Sales Comparison", "", "Mean Units Sold");
    emit_chart(
        plot_bar_png(
            &["Con1".to_string(), "Con2".to_string()],
            &[mean1, mean2],
            &path,
            &settings,
        ),
        path,
        report,
    );
}

#[cfg(not(feature = "visualization"))]
fn render_charts(_df: &DataFrame, _out_dir: &Path, _report: &mut PipelineReport) {}
