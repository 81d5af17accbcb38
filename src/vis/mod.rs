//! Chart rendering (requires the `visualization` feature).
//!
//! Charts are a second, independent consumer of the computed rows: each
//! function receives ordered labels/values plus a title and axis labels and
//! persists a PNG. Rendering failures surface as
//! [`Error::Visualization`](crate::Error) and are never allowed to block
//! table generation; the pipelines downgrade them to warnings.

pub mod plotters_backend;

pub use plotters_backend::{plot_bar_png, plot_grouped_bar_png, plot_histogram_png};

/// Settings shared by every chart.
#[derive(Debug, Clone)]
pub struct PlotSettings {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Fixed y-axis maximum; autoscaled when None.
    pub y_max: Option<f64>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            title: "Plot".to_string(),
            x_label: String::new(),
            y_label: String::new(),
            width: 840,
            height: 600,
            y_max: None,
        }
    }
}

impl PlotSettings {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        PlotSettings {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            ..PlotSettings::default()
        }
    }

    pub fn with_y_max(mut self, y_max: f64) -> Self {
        self.y_max = Some(y_max);
        self
    }
}
