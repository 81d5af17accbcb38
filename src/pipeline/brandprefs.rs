//! Brandprefs dataset: brand preference responses by area.
//!
//! A percentage breakdown of brand counts within each area; in chart mode,
//! one bar chart per area plus a clustered area comparison.

use std::path::Path;

use crate::groupby::{percentage_of_group, KeyOrder, PercentageRow};
use crate::io::csv::read_csv;
use crate::pipeline::{emit_table, run_dataset, stage, PipelineReport, Stage, StageResult};
use crate::schema::{ColumnType, Schema};
use crate::table::{fmt_count, fmt_float, Table};

fn schema() -> Schema {
    Schema::new(
        "brandprefs",
        &[
            ("Area", ColumnType::Int),
            ("Brand", ColumnType::Categorical),
        ],
    )
}

pub fn run(input: &Path, out_dir: &Path, charts: bool) -> PipelineReport {
    run_dataset("brandprefs", |report| execute(input, out_dir, charts, report))
}

fn execute(
    input: &Path,
    out_dir: &Path,
    charts: bool,
    report: &mut PipelineReport,
) -> StageResult<()> {
    let df = stage(Stage::Load, read_csv(input, &schema()))?;
    let rows = stage(
        Stage::Aggregate,
        percentage_of_group(&df, "Area", Some("Brand"), &KeyOrder::Natural),
    )?;

    let mut table = Table::new(["Area", "Brand", "Count", "Total", "Pct"]);
    for row in &rows {
        table.push_row(vec![
            row.key[0].to_string(),
            row.key[1].to_string(),
            fmt_count(row.count),
            fmt_count(row.total),
            fmt_float(row.pct),
        ]);
    }
    emit_table(&table, out_dir, "BrandPrefs_Percentages.csv", report)?;

    if charts {
        render_charts(&rows, out_dir, report);
    }
    Ok(())
}

#[cfg(feature = "visualization")]
fn render_charts(rows: &[PercentageRow], out_dir: &Path, report: &mut PipelineReport) {
    use crate::pipeline::emit_chart;
    use crate::vis::{plot_bar_png, plot_grouped_bar_png, PlotSettings};

    // Rows arrive sorted by area then brand, so runs of equal area are
    // contiguous.
    let mut areas: Vec<String> = Vec::new();
    for row in rows {
        let area = row.key[0].to_string();
        if areas.last() != Some(&area) {
            areas.push(area);
        }
    }
    let mut brands: Vec<String> = Vec::new();
    for row in rows {
        let brand = row.key[1].to_string();
        if !brands.contains(&brand) {
            brands.push(brand);
        }
    }
    brands.sort();

    for area in &areas {
        let (labels, values): (Vec<String>, Vec<f64>) = rows
            .iter()
            .filter(|r| r.key[0].to_string() == *area)
            .map(|r| (r.key[1].to_string(), r.pct))
            .unzip();
        let path = out_dir.join(format!("Brandprefs_Area{}.png", area));
        let settings =
            PlotSettings::new(&format!("Brand Preferences - Area {}", area), "Brand", "Percentage")
                .with_y_max(100.0);
        emit_chart(plot_bar_png(&labels, &values, &path, &settings), path, report);
    }

    if areas.len() > 1 {
        let series: Vec<(String, Vec<f64>)> = areas
            .iter()
            .map(|area| {
                let values = brands
                    .iter()
                    .map(|brand| {
                        rows.iter()
                            .find(|r| {
                                r.key[0].to_string() == *area && r.key[1].to_string() == *brand
                            })
                            .map(|r| r.pct)
                            .unwrap_or(0.0)
                    })
                    .collect();
                (format!("Area {}", area), values)
            })
            .collect();

        let path = out_dir.join("Brandprefs_Clustered.png");
        let settings = PlotSettings::new("Brand Preferences by Area", "Brand", "Percentage")
            .with_y_max(100.0);
        emit_chart(
            plot_grouped_bar_png(&brands, &series, &path, &settings),
            path,
            report,
        );
    }
}

#[cfg(not(feature = "visualization"))]
fn render_charts(_rows: &[PercentageRow], _out_dir: &Path, _report: &mut PipelineReport) {}
