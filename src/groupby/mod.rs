//! Grouping and per-group aggregation.
//!
//! [`GroupBy`] partitions a [`DataFrame`] by one or two categorical key
//! columns. Rows with a missing key cell are omitted; every other row lands in
//! exactly one group. Groups iterate in sorted key order, so every downstream
//! table is deterministic.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::frame::{DataFrame, Value};
use crate::stats::histogram::{bins_from_edges, HistogramRow};
use crate::stats::{self, round_to, SummaryStats};

/// Sort order for one key position.
#[derive(Debug, Clone)]
pub enum KeyOrder {
    /// Numeric for Int/Float keys, lexical for Str keys.
    Natural,
    /// Explicit categorical order (e.g. Absent < Sparse < Abundant).
    /// Values not in the list sort after those that are, in natural order.
    Declared(Vec<String>),
}

impl KeyOrder {
    pub fn cmp(&self, a: &Value, b: &Value) -> Ordering {
        match self {
            KeyOrder::Natural => a.cmp_order(b),
            KeyOrder::Declared(order) => {
                let rank = |v: &Value| match v {
                    Value::Str(s) => order.iter().position(|o| o == s),
                    _ => None,
                };
                match (rank(a), rank(b)) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => a.cmp_order(b),
                }
            }
        }
    }
}

/// A DataFrame partitioned by key columns, groups in sorted key order.
#[derive(Debug)]
pub struct GroupBy<'a> {
    frame: &'a DataFrame,
    groups: Vec<(Vec<Value>, Vec<usize>)>,
}

impl<'a> GroupBy<'a> {
    /// Group by one or two key columns in natural key order.
    pub fn new(frame: &'a DataFrame, by: &[&str]) -> Result<Self> {
        let orders = vec![KeyOrder::Natural; by.len()];
        GroupBy::with_order(frame, by, orders)
    }

    /// Group with an explicit sort order per key position.
    pub fn with_order(frame: &'a DataFrame, by: &[&str], orders: Vec<KeyOrder>) -> Result<Self> {
        if by.is_empty() || by.len() > 2 {
            return Err(Error::Consistency(format!(
                "grouping takes one or two key columns, got {}",
                by.len()
            )));
        }
        if orders.len() != by.len() {
            return Err(Error::Consistency(format!(
                "got {} key orders for {} key columns",
                orders.len(),
                by.len()
            )));
        }

        let key_columns: Vec<&[Option<Value>]> = by
            .iter()
            .map(|name| frame.column(name))
            .collect::<Result<_>>()?;

        // Rows with any missing key cell are excluded from grouping.
        let mut keyed: Vec<(Vec<Value>, usize)> = Vec::new();
        let mut skipped = 0usize;
        for row in 0..frame.row_count() {
            let key: Option<Vec<Value>> = key_columns
                .iter()
                .map(|col| col[row].clone())
                .collect();
            match key {
                Some(key) => keyed.push((key, row)),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            log::debug!("grouping skipped {} rows with missing key cells", skipped);
        }

        // Stable sort keeps row order within each group.
        keyed.sort_by(|(a, _), (b, _)| {
            a.iter()
                .zip(b.iter())
                .zip(orders.iter())
                .map(|((x, y), order)| order.cmp(x, y))
                .find(|&o| o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        let mut groups: Vec<(Vec<Value>, Vec<usize>)> = Vec::new();
        for (key, row) in keyed {
            match groups.last_mut() {
                Some((last, rows)) if *last == key => rows.push(row),
                _ => groups.push((key, vec![row])),
            }
        }

        Ok(GroupBy { frame, groups })
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Group keys in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &[Value]> {
        self.groups.iter().map(|(key, _)| key.as_slice())
    }

    /// Number of member rows per group.
    pub fn size(&self) -> Vec<(Vec<Value>, usize)> {
        self.groups
            .iter()
            .map(|(key, rows)| (key.clone(), rows.len()))
            .collect()
    }

    /// Non-missing values of one numeric measure per group, in group order.
    pub fn values_by(&self, measure: &str) -> Result<Vec<(Vec<Value>, Vec<f64>)>> {
        let column = self.frame.f64_column(measure)?;
        Ok(self
            .groups
            .iter()
            .map(|(key, rows)| {
                (
                    key.clone(),
                    rows.iter().filter_map(|&i| column[i]).collect(),
                )
            })
            .collect())
    }

    /// Summary statistics of one numeric measure per group, rounded to three
    /// decimals. A group whose measure is entirely missing yields Count=0 and
    /// NaN statistics; every group being empty is a hard error.
    pub fn summary_by(&self, measure: &str) -> Result<Vec<(Vec<Value>, SummaryStats)>> {
        let column = self.frame.f64_column(measure)?;
        let mut out = Vec::with_capacity(self.groups.len());
        let mut any_observed = false;
        for (key, rows) in &self.groups {
            let values: Vec<f64> = rows.iter().filter_map(|&i| column[i]).collect();
            any_observed |= !values.is_empty();
            out.push((key.clone(), stats::summary(&values).rounded(3)));
        }
        if !out.is_empty() && !any_observed {
            return Err(Error::EmptyData(format!(
                "no numeric observations of '{}' in any group",
                measure
            )));
        }
        Ok(out)
    }

    /// Frequency histogram of one numeric measure per group over fixed bin
    /// edges. Every bin appears for every group, zero-filled where a group
    /// has no observations, sorted by group then by lower edge.
    pub fn histogram_by(&self, measure: &str, edges: &[f64]) -> Result<Vec<HistogramRow>> {
        let bins = bins_from_edges(edges)?;
        let column = self.frame.f64_column(measure)?;

        let mut out = Vec::with_capacity(self.groups.len() * bins.len());
        for (key, rows) in &self.groups {
            let values: Vec<f64> = rows.iter().filter_map(|&i| column[i]).collect();
            let (tally, dropped) = stats::histogram::counts(&values, &bins);
            if dropped > 0 {
                log::debug!(
                    "histogram of '{}' for group {:?} dropped {} out-of-range values",
                    measure,
                    key,
                    dropped
                );
            }
            let total: usize = tally.iter().sum();
            for (bin, frequency) in bins.iter().zip(tally) {
                let relative_freq = if total == 0 {
                    f64::NAN
                } else {
                    round_to(frequency as f64 / total as f64, 4)
                };
                out.push(HistogramRow {
                    group: key.clone(),
                    bin: *bin,
                    frequency,
                    relative_freq,
                });
            }
        }
        Ok(out)
    }
}

/// One row of a percentage breakdown.
#[derive(Debug, Clone)]
pub struct PercentageRow {
    /// Outer key, plus the inner key when one was given.
    pub key: Vec<Value>,
    pub count: usize,
    /// Denominator: total count over the outer group (or grand total).
    pub total: usize,
    /// `100 * count / total`, rounded to one decimal; NaN on a zero total.
    pub pct: f64,
}

/// Percentage of each (outer, inner) combination within its outer group.
///
/// Only combinations present in the data are emitted (no zero-filling).
/// Without an inner key the percentage is of the grand total.
pub fn percentage_of_group(
    frame: &DataFrame,
    outer: &str,
    inner: Option<&str>,
    order: &KeyOrder,
) -> Result<Vec<PercentageRow>> {
    let rows = match inner {
        Some(inner) => {
            let gb = GroupBy::with_order(
                frame,
                &[outer, inner],
                vec![order.clone(), KeyOrder::Natural],
            )?;
            gb.size()
        }
        None => GroupBy::with_order(frame, &[outer], vec![order.clone()])?.size(),
    };

    let mut out = Vec::with_capacity(rows.len());
    for (key, count) in &rows {
        let total: usize = match inner {
            // Sum over all inner keys sharing this outer key.
            Some(_) => rows
                .iter()
                .filter(|(k, _)| k[0] == key[0])
                .map(|(_, c)| c)
                .sum(),
            None => rows.iter().map(|(_, c)| c).sum(),
        };
        let pct = if total == 0 {
            f64::NAN
        } else {
            round_to(100.0 * *count as f64 / total as f64, 1)
        };
        out.push(PercentageRow {
            key: key.clone(),
            count: *count,
            total,
            pct,
        });
    }
    Ok(out)
}
