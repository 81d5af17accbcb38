//! Plotters-based PNG rendering for bar charts and histograms.

use std::path::Path;

use plotters::prelude::*;

use crate::error::Result;
use crate::vis::PlotSettings;

/// Bar chart of one value per label.
pub fn plot_bar_png<P: AsRef<Path>>(
    labels: &[String],
    values: &[f64],
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    let path = path.as_ref();
    let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = axis_max(values, settings);
    let n = labels.len() as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(&settings.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..n - 0.5, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(settings.x_label.as_str())
        .y_desc(settings.y_label.as_str())
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| tick_label(labels, *x))
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
        Rectangle::new(
            [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, v)],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Clustered bar chart: one bar per series within each label position.
pub fn plot_grouped_bar_png<P: AsRef<Path>>(
    labels: &[String],
    series: &[(String, Vec<f64>)],
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    let path = path.as_ref();
    let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let all: Vec<f64> = series.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    let y_max = axis_max(&all, settings);
    let n = labels.len() as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(&settings.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..n - 0.5, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(settings.x_label.as_str())
        .y_desc(settings.y_label.as_str())
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| tick_label(labels, *x))
        .draw()?;

    let bar_width = 0.8 / series.len() as f64;
    for (s, (name, values)) in series.iter().enumerate() {
        let color = Palette99::pick(s).mix(0.85);
        let offset = -0.4 + bar_width * s as f64;
        chart
            .draw_series(values.iter().enumerate().map(|(i, &v)| {
                let x0 = i as f64 + offset;
                Rectangle::new([(x0, 0.0), (x0 + bar_width, v)], color.filled())
            }))?
            .label(name.clone())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Frequency histogram of raw observations over explicit bin edges.
///
/// Chart bins follow the plotting convention (closed on the left, last bin
/// closed on both sides); the exported histogram *tables* use the half-open
/// `(lo, hi]` policy from `stats::histogram`.
pub fn plot_histogram_png<P: AsRef<Path>>(
    values: &[f64],
    edges: &[f64],
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    let path = path.as_ref();
    let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE)?;

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

    let y_max = axis_max(
        &tally.iter().map(|&c| c as f64).collect::<Vec<_>>(),
        settings,
    );
    let (x_min, x_max) = match (edges.first(), edges.last()) {
        (Some(&lo), Some(&hi)) if lo < hi => (lo, hi),
        _ => (0.0, 1.0),
    };
    let mut chart = ChartBuilder::on(&root)
        .caption(&settings.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(settings.x_label.as_str())
        .y_desc(settings.y_label.as_str())
        .draw()?;

    chart.draw_series(tally.iter().enumerate().map(|(i, &count)| {
        Rectangle::new(
            [(edges[i], 0.0), (edges[i + 1], count as f64)],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Autoscaled y-axis maximum with 10% headroom, unless pinned by settings.
fn axis_max(values: &[f64], settings: &PlotSettings) -> f64 {
    if let Some(y_max) = settings.y_max {
        return y_max;
    }
    let max = values.iter().copied().fold(0.0f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Label integer tick positions with the matching category, nothing else.
fn tick_label(labels: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() < 1e-6 && i >= 0.0 {
        labels.get(i as usize).cloned().unwrap_or_default()
    } else {
        String::new()
    }
}
