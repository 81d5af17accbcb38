//! Superplus dataset: income by sex.
//!
//! One grouped summary table; in chart mode, a per-sex income histogram and a
//! grouped bar of binned income percentages.

use std::path::Path;

use crate::groupby::GroupBy;
use crate::io::csv::read_csv;
use crate::pipeline::{emit_table, run_dataset, stage, PipelineReport, Stage, StageResult};
use crate::schema::{ColumnType, Schema};
use crate::table::{fmt_count, fmt_float, Table};

fn schema() -> Schema {
    Schema::new(
        "superplus",
        &[
            ("Sex", ColumnType::Categorical),
            ("Income", ColumnType::Float),
        ],
    )
}

pub fn run(input: &Path, out_dir: &Path, charts: bool) -> PipelineReport {
    run_dataset("superplus", |report| execute(input, out_dir, charts, report))
}

fn execute(
    input: &Path,
    out_dir: &Path,
    charts: bool,
    report: &mut PipelineReport,
) -> StageResult<()> {
    let df = stage(Stage::Load, read_csv(input, &schema()))?;
    let gb = stage(Stage::Aggregate, GroupBy::new(&df, &["Sex"]))?;
    let rows = stage(Stage::Aggregate, gb.summary_by("Income"))?;

    let mut table = Table::new(["Sex", "Count", "Mean", "Median", "SD", "Min", "Max"]);
    for (key, s) in &rows {
        table.push_row(vec![
            key[0].to_string(),
            fmt_count(s.count),
            fmt_float(s.mean),
            fmt_float(s.median),
            fmt_float(s.std),
            fmt_float(s.min),
            fmt_float(s.max),
        ]);
    }
    emit_table(&table, out_dir, "Superplus_Summary.csv", report)?;

    if charts {
        render_charts(&gb, out_dir, report);
    }
    Ok(())
}

#[cfg(feature = "visualization")]
fn render_charts(gb: &GroupBy<'_>, out_dir: &Path, report: &mut PipelineReport) {
    use crate::pipeline::emit_chart;
    use crate::stats::bin_edges;
    use crate::vis::{plot_grouped_bar_png, plot_histogram_png, PlotSettings};

    let groups = match gb.values_by("Income") {
        Ok(groups) => groups,
        Err(err) => {
            log::warn!("superplus charts skipped: {}", err);
            return;
        }
    };

    // One histogram per sex, twelve equal-width bins over that sex's range.
    for (key, values) in &groups {
        if values.is_empty() {
            continue;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let edges: Vec<f64> = if max > min {
            (0..=12).map(|i| min + (max - min) * i as f64 / 12.0).collect()
        } else {
            vec![min - 0.5, max + 0.5]
        };
        let sex = key[0].to_string();
        let path = out_dir.join(format!("Superplus_Hist_{}.png", sex));
        let settings = PlotSettings::new(
            &format!("Superplus Income Histogram - {}", sex),
            "Income (thousands)",
            "Frequency",
        );
        emit_chart(
            plot_histogram_png(values, &edges, &path, &settings),
            path,
            report,
        );
    }

    // Grouped bar of binned income percentages by sex, bin width 10 from the
    // rounded-down overall minimum.
    let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    if all.is_empty() {
        return;
    }
    let min = all.iter().copied().fold(f64::INFINITY, f64::min);
    let max = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = (min / 10.0).floor() * 10.0;
    let hi = (max / 10.0).floor() * 10.0 + 10.0;
    let edges = bin_edges(lo, hi, 10.0);

    let labels: Vec<String> = edges
        .windows(2)
        .map(|w| format!("{}-{}", w[0] as i64, w[1] as i64))
        .collect();
    let series: Vec<(String, Vec<f64>)> = groups
        .iter()
        .map(|(key, values)| (key[0].to_string(), chart_bin_pct(values, &edges)))
        .collect();

    let path = out_dir.join("Superplus_GroupedBar.png");
    let settings = PlotSettings::new(
        "Superplus Income Distribution by Sex (Binned %)",
        "Income (thousands)",
        "Percentage",
    );
    emit_chart(
        plot_grouped_bar_png(&labels, &series, &path, &settings),
        path,
        report,
    );
}

/// Percentage of values per chart bin (closed-left convention, last bin
/// closed on both sides).
#[cfg(feature = "visualization")]
fn chart_bin_pct(values: &[f64], edges: &[f64]) -> Vec<f64> {
    let n_bins = edges.len().saturating_sub(1);
    let mut tally = vec![0usize; n_bins];
    for &v in values {
        for i in 0..n_bins {
            let last = i == n_bins - 1;
            if v >= edges[i] && (v < edges[i + 1] || (last && v <= edges[i + 1])) {
                tally[i] += 1;
                break;
            }
        }
    }
    let total: usize = tally.iter().sum();
    tally
        .iter()
        .map(|&c| {
            if total == 0 {
                0.0
            } else {
                100.0 * c as f64 / total as f64
            }
        })
        .collect()
}

#[cfg(not(feature = "visualization"))]
fn render_charts(_gb: &GroupBy<'_>, _out_dir: &Path, _report: &mut PipelineReport) {}
