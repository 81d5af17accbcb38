// Summary statistics implementation.

use crate::stats::SummaryStats;

/// Internal implementation behind `stats::summary`.
pub(crate) fn summary_impl(data: &[f64]) -> SummaryStats {
    let count = data.len();
    if count == 0 {
        return SummaryStats::empty();
    }

    let mean = data.iter().sum::<f64>() / count as f64;

    // Sample standard deviation, n-1 denominator.
    let std = if count > 1 {
        let sum_squared_diff = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>();
        (sum_squared_diff / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    SummaryStats {
        count,
        mean,
        median: percentile(&sorted, 0.5),
        std,
        min: sorted[0],
        max: sorted[count - 1],
    }
}

/// Percentile of pre-sorted data, linear interpolation between order
/// statistics (the convention pandas and NumPy default to).
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return f64::NAN;
    }

    let n = sorted_data.len();
    let idx = p * (n - 1) as f64;
    let idx_floor = idx.floor() as usize;
    let idx_ceil = idx.ceil() as usize;

    if idx_floor == idx_ceil {
        return sorted_data[idx_floor];
    }

    let weight_ceil = idx - idx_floor as f64;
    let weight_floor = 1.0 - weight_ceil;

    sorted_data[idx_floor] * weight_floor + sorted_data[idx_ceil] * weight_ceil
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = summary_impl(&data);

        assert_eq!(stats.count, 5);
        assert!((stats.mean - 3.0).abs() < 1e-10);
        assert!((stats.std - 1.5811388300841898).abs() < 1e-10);
        assert!((stats.min - 1.0).abs() < 1e-10);
        assert!((stats.max - 5.0).abs() < 1e-10);
        assert!((stats.median - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_even_count_interpolates_median() {
        let data = vec![20.0, 30.0];
        let stats = summary_impl(&data);
        assert!((stats.median - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_singleton_has_nan_std() {
        let stats = summary_impl(&[50.0]);
        assert_eq!(stats.count, 1);
        assert!((stats.mean - 50.0).abs() < 1e-10);
        assert!(stats.std.is_nan());
    }

    #[test]
    fn test_summary_empty() {
        let stats = summary_impl(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
        assert!(stats.min.is_nan());
    }

    #[test]
    fn test_percentile() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&sorted, 0.5) - 2.5).abs() < 1e-10);
        assert!((percentile(&sorted, 0.0) - 1.0).abs() < 1e-10);
        assert!((percentile(&sorted, 1.0) - 4.0).abs() < 1e-10);
    }
}
