//! Descriptive statistics.
//!
//! Summary statistics (count, mean, median, sample standard deviation, min,
//! max) for numeric slices, plus the half-open binning used by the frequency
//! histograms. Anything that cannot be computed (the mean of nothing, the
//! standard deviation of a single value) degrades to NaN rather than failing,
//! so an empty group still produces a representable row.

pub mod descriptive;
pub mod histogram;

pub use histogram::{bin_edges, Bin, HistogramRow};

use crate::error::{Error, Result};
use crate::frame::DataFrame;

/// Summary statistics for one group or one measure column.
#[derive(Debug, Clone, Copy)]
pub struct SummaryStats {
    /// Number of non-missing observations.
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n-1 denominator); NaN when count < 2.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryStats {
    /// All-NaN statistics for a group with no observations.
    pub fn empty() -> Self {
        SummaryStats {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        }
    }

    /// Copy with every float member rounded to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        SummaryStats {
            count: self.count,
            mean: round_to(self.mean, decimals),
            median: round_to(self.median, decimals),
            std: round_to(self.std, decimals),
            min: round_to(self.min, decimals),
            max: round_to(self.max, decimals),
        }
    }
}

/// Compute summary statistics over a numeric slice.
pub fn summary<T: AsRef<[f64]>>(data: T) -> SummaryStats {
    descriptive::summary_impl(data.as_ref())
}

/// Summary statistics per numeric column of a flat (ungrouped) table,
/// rounded to three decimals.
///
/// Missing cells are skipped. An entirely empty column yields NaN statistics;
/// every requested column being empty is a hard error.
pub fn column_summary(
    frame: &DataFrame,
    columns: &[&str],
) -> Result<Vec<(String, SummaryStats)>> {
    let mut out = Vec::with_capacity(columns.len());
    let mut any_observed = false;
    for &name in columns {
        let values: Vec<f64> = frame.f64_column(name)?.into_iter().flatten().collect();
        any_observed |= !values.is_empty();
        out.push((name.to_string(), summary(&values).rounded(3)));
    }
    if !out.is_empty() && !any_observed {
        return Err(Error::EmptyData(format!(
            "no numeric observations in any of the columns {:?}",
            columns
        )));
    }
    Ok(out)
}

/// Round to `decimals` places, ties to even (banker's rounding).
pub fn round_to(x: f64, decimals: i32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let factor = 10f64.powi(decimals);
    (x * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_ties_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.135, 2), 0.14);
        assert_eq!(round_to(2.6666666, 3), 2.667);
        assert!(round_to(f64::NAN, 3).is_nan());
    }
}
