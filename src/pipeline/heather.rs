//! Heather dataset: plant prevalence counts at two locations.
//!
//! The raw sheet carries a wrong header (a stray "Frequencies" title and two
//! unnamed columns), so it is read positionally and repaired: the first data
//! column becomes `Prevalence`, the next two become the per-location counts.
//! Rows outside the fixed prevalence levels (header echoes, footer notes) are
//! discarded before the counts are coerced to integers.

use std::path::Path;

use crate::error::Error;
use crate::frame::{DataFrame, Value};
use crate::groupby::KeyOrder;
use crate::io::csv::read_csv_raw;
use crate::pipeline::{emit_table, run_dataset, stage, PipelineReport, Stage, StageResult};
use crate::stats::round_to;
use crate::table::{fmt_float, fmt_int, Table};

/// Valid prevalence levels, in their natural categorical order.
const PREVALENCE_LEVELS: [&str; 3] = ["Absent", "Sparse", "Abundant"];

pub fn run(input: &Path, out_dir: &Path, charts: bool) -> PipelineReport {
    run_dataset("heather", |report| execute(input, out_dir, charts, report))
}

fn execute(
    input: &Path,
    out_dir: &Path,
    charts: bool,
    report: &mut PipelineReport,
) -> StageResult<()> {
    let raw = stage(Stage::Load, read_csv_raw(input))?;
    if raw.column_count() < 3 {
        return Err((
            Stage::Load,
            Error::SchemaMismatch {
                dataset: "heather".to_string(),
                field: format!("expected at least 3 columns, found {}", raw.column_count()),
            },
        ));
    }

    let df = stage(Stage::Clean, clean(&raw))?;
    let rows = stage(Stage::Aggregate, collect_rows(&df))?;

    let tot_a: i64 = rows.iter().map(|r| r.1).sum();
    let tot_b: i64 = rows.iter().map(|r| r.2).sum();

    let mut table = Table::new(["Prevalence", "Location A", "Location B", "Pct_A", "Pct_B"]);
    for (prevalence, a, b) in &rows {
        table.push_row(vec![
            prevalence.to_string(),
            fmt_int(*a),
            fmt_int(*b),
            fmt_float(pct(*a, tot_a)),
            fmt_float(pct(*b, tot_b)),
        ]);
    }
    emit_table(&table, out_dir, "Heather_Percentages.csv", report)?;

    if charts {
        render_charts(&rows, tot_a, tot_b, out_dir, report);
    }
    Ok(())
}

/// Repair the header, drop incomplete rows, keep only the fixed prevalence
/// levels, and coerce the count columns to integers.
fn clean(raw: &DataFrame) -> crate::error::Result<DataFrame> {
    let names = raw.column_names().to_vec();
    let mut df = DataFrame::new();
    for (i, name) in ["Prevalence", "Location A", "Location B"]
        .iter()
        .enumerate()
    {
        df.add_column(name.to_string(), raw.column(&names[i])?.to_vec())?;
    }

    df.drop_na();

    let keep: Vec<bool> = df
        .column("Prevalence")?
        .iter()
        .map(|cell| match cell {
            Some(Value::Str(s)) => PREVALENCE_LEVELS.contains(&s.as_str()),
            _ => false,
        })
        .collect();
    let rejected = keep.iter().filter(|&&k| !k).count();
    if rejected > 0 {
        log::debug!("heather: discarded {} rows outside the prevalence levels", rejected);
    }
    df.retain_rows(&keep)?;

    df.cast_column_to_int("Location A")?;
    df.cast_column_to_int("Location B")?;
    Ok(df)
}

/// Cleaned rows in declared prevalence order (Absent < Sparse < Abundant).
fn collect_rows(df: &DataFrame) -> crate::error::Result<Vec<(Value, i64, i64)>> {
    let a = df.i64_column("Location A")?;
    let b = df.i64_column("Location B")?;

    let mut rows = Vec::with_capacity(df.row_count());
    for i in 0..df.row_count() {
        if let (Some(p), Some(a), Some(b)) = (df.get("Prevalence", i), a[i], b[i]) {
            rows.push((p.clone(), a, b));
        }
    }

    let order = KeyOrder::Declared(PREVALENCE_LEVELS.iter().map(|s| s.to_string()).collect());
    rows.sort_by(|x, y| order.cmp(&x.0, &y.0));
    Ok(rows)
}

/// Percentage of a column total, one decimal; NaN on a zero total.
fn pct(count: i64, total: i64) -> f64 {
    if total == 0 {
        f64::NAN
    } else {
        round_to(100.0 * count as f64 / total as f64, 1)
    }
}

#[cfg(feature = "visualization")]
fn render_charts(
    rows: &[(Value, i64, i64)],
    tot_a: i64,
    tot_b: i64,
    out_dir: &Path,
    report: &mut PipelineReport,
) {
    use crate::pipeline::emit_chart;
    use crate::vis::{plot_grouped_bar_png, PlotSettings};

    if rows.is_empty() {
        return;
    }
    let labels: Vec<String> = rows.iter().map(|r| r.0.to_string()).collect();
    let series = vec![
        (
            "Location A".to_string(),
            rows.iter().map(|r| pct(r.1, tot_a)).collect(),
        ),
        (
            "Location B".to_string(),
            rows.iter().map(|r| pct(r.2, tot_b)).collect(),
        ),
    ];

    let path = out_dir.join("Heather_Clustered.png");
    let settings = PlotSettings::new("Heather Prevalence by Location", "Prevalence", "Percentage");
    emit_chart(
        plot_grouped_bar_png(&labels, &series, &path, &settings),
        path,
        report,
    );
}

#[cfg(not(feature = "visualization"))]
fn render_charts(
    _rows: &[(Value, i64, i64)],
    _tot_a: i64,
    _tot_b: i64,
    _out_dir: &Path,
    _report: &mut PipelineReport,
) {
}
