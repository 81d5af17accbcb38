//! Half-open frequency bins.
//!
//! Bins are `(lo, hi]`: a value equal to a bin's lower edge belongs to the
//! previous bin, not this one. Values at or below the first edge or above the
//! last edge fall outside every bin and are dropped from the tally.

use crate::error::{Error, Result};
use crate::frame::Value;

/// Fixed-width edges from `start` to `stop` inclusive.
pub fn bin_edges(start: f64, stop: f64, width: f64) -> Vec<f64> {
    let mut edges = Vec::new();
    let mut edge = start;
    let mut i = 0u32;
    while edge <= stop + 1e-9 {
        edges.push(edge);
        i += 1;
        edge = start + width * i as f64;
    }
    edges
}

/// One half-open interval `(lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
}

impl Bin {
    /// Membership test: `lo < v <= hi`. The lower edge is excluded.
    pub fn contains(&self, v: f64) -> bool {
        self.lo < v && v <= self.hi
    }

    /// Interval label, e.g. `(-6, -4]`. Whole edges print without decimals.
    pub fn label(&self) -> String {
        format!("({}, {}]", fmt_edge(self.lo), fmt_edge(self.hi))
    }
}

fn fmt_edge(x: f64) -> String {
    if x.fract() == 0.0 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}

/// Turn an ascending edge sequence into consecutive bins.
pub fn bins_from_edges(edges: &[f64]) -> Result<Vec<Bin>> {
    if edges.len() < 2 {
        return Err(Error::Consistency(
            "histogram needs at least two bin edges".to_string(),
        ));
    }
    if edges.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::Consistency(
            "histogram bin edges must be strictly ascending".to_string(),
        ));
    }
    Ok(edges
        .windows(2)
        .map(|w| Bin { lo: w[0], hi: w[1] })
        .collect())
}

/// Index of the bin holding `v`, or `None` when `v` falls outside all bins
/// (including `v` exactly at the first edge).
pub fn bin_index(bins: &[Bin], v: f64) -> Option<usize> {
    bins.iter().position(|b| b.contains(v))
}

/// Tally values into bins. Returns per-bin counts and the number of values
/// dropped for falling outside every bin.
pub fn counts(values: &[f64], bins: &[Bin]) -> (Vec<usize>, usize) {
    let mut tally = vec![0usize; bins.len()];
    let mut dropped = 0usize;
    for &v in values {
        match bin_index(bins, v) {
            Some(i) => tally[i] += 1,
            None => dropped += 1,
        }
    }
    (tally, dropped)
}

/// One row of a grouped frequency histogram.
#[derive(Debug, Clone)]
pub struct HistogramRow {
    /// Group key (one or two categorical values).
    pub group: Vec<Value>,
    pub bin: Bin,
    pub frequency: usize,
    /// Frequency over the group's total tallied count, rounded to 4 decimals;
    /// NaN when the group tallied nothing.
    pub relative_freq: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_edges_inclusive_stop() {
        let edges = bin_edges(-6.0, 14.0, 2.0);
        assert_eq!(edges.len(), 11);
        assert_eq!(edges[0], -6.0);
        assert_eq!(edges[10], 14.0);
    }

    #[test]
    fn test_lower_edge_excluded() {
        let bins = bins_from_edges(&bin_edges(-6.0, 14.0, 2.0)).unwrap();
        // -4 sits on the edge between (-6, -4] and (-4, -2]: it belongs to
        // the former.
        assert_eq!(bin_index(&bins, -4.0), Some(0));
        assert_eq!(bin_index(&bins, -3.9), Some(1));
        // Exactly the first edge falls outside every bin.
        assert_eq!(bin_index(&bins, -6.0), None);
        assert_eq!(bin_index(&bins, 14.0), Some(9));
        assert_eq!(bin_index(&bins, 14.1), None);
    }

    #[test]
    fn test_counts_drops_out_of_range() {
        let bins = bins_from_edges(&[0.0, 2.0, 4.0]).unwrap();
        let (tally, dropped) = counts(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], &bins);
        assert_eq!(tally, vec![2, 2]);
        assert_eq!(dropped, 2); // 0.0 at the first edge, 5.0 beyond the last
    }

    #[test]
    fn test_label_formatting() {
        let bin = Bin { lo: -6.0, hi: -4.0 };
        assert_eq!(bin.label(), "(-6, -4]");
        let bin = Bin { lo: 0.5, hi: 1.5 };
        assert_eq!(bin.label(), "(0.5, 1.5]");
    }

    #[test]
    fn test_bad_edges_rejected() {
        assert!(bins_from_edges(&[0.0]).is_err());
        assert!(bins_from_edges(&[0.0, 0.0, 1.0]).is_err());
        assert!(bins_from_edges(&[2.0, 1.0]).is_err());
    }
}
