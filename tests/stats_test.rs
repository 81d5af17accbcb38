use tabrs::stats::{column_summary, round_to, summary};
use tabrs::{DataFrame, Value};

#[test]
fn test_summary_matches_hand_computation() {
    let stats = summary(&[20.0, 30.0]);
    assert_eq!(stats.count, 2);
    assert!((stats.mean - 25.0).abs() < 1e-10);
    assert!((stats.median - 25.0).abs() < 1e-10);
    assert!((stats.min - 20.0).abs() < 1e-10);
    assert!((stats.max - 30.0).abs() < 1e-10);
    // Sample standard deviation of {20, 30} is sqrt(50).
    assert!((stats.std - 50f64.sqrt()).abs() < 1e-10);
}

#[test]
fn test_summary_degrades_to_nan() {
    let empty = summary(&[]);
    assert_eq!(empty.count, 0);
    assert!(empty.mean.is_nan());
    assert!(empty.std.is_nan());

    let singleton = summary(&[50.0]);
    assert_eq!(singleton.count, 1);
    assert!((singleton.mean - 50.0).abs() < 1e-10);
    assert!(singleton.std.is_nan());
}

#[test]
fn test_rounded_uses_three_decimals() {
    let stats = summary(&[1.0, 2.0]).rounded(3);
    assert_eq!(stats.std, 0.707);
}

#[test]
fn test_round_to_half_even() {
    assert_eq!(round_to(0.125, 2), 0.12);
    assert_eq!(round_to(0.875, 2), 0.88);
    assert_eq!(round_to(7.0710678, 3), 7.071);
    assert!(round_to(f64::NAN, 1).is_nan());
}

fn designs_frame() -> DataFrame {
    let mut df = DataFrame::new();
    df.add_column(
        "Con1".to_string(),
        vec![Some(Value::Int(40)), Some(Value::Int(20))],
    )
    .unwrap();
    df.add_column(
        "Con2".to_string(),
        vec![Some(Value::Int(35)), Some(Value::Int(25))],
    )
    .unwrap();
    df
}

#[test]
fn test_column_summary_flat_table() {
    let df = designs_frame();
    let stats = column_summary(&df, &["Con1", "Con2"]).unwrap();

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].0, "Con1");
    assert_eq!(stats[0].1.mean, 30.0);
    assert_eq!(stats[0].1.std, 14.142);
    assert_eq!(stats[0].1.min, 20.0);
    assert_eq!(stats[0].1.max, 40.0);
    assert_eq!(stats[1].0, "Con2");
    assert_eq!(stats[1].1.std, 7.071);
}

#[test]
fn test_column_summary_all_empty_is_hard_error() {
    let mut df = DataFrame::new();
    df.add_column("Con1".to_string(), vec![None, None]).unwrap();
    df.add_column("Con2".to_string(), vec![None, None]).unwrap();
    assert!(column_summary(&df, &["Con1", "Con2"]).is_err());
}

#[test]
fn test_column_summary_single_empty_column_degrades() {
    let mut df = DataFrame::new();
    df.add_column(
        "Con1".to_string(),
        vec![Some(Value::Int(1)), Some(Value::Int(2))],
    )
    .unwrap();
    df.add_column("Con2".to_string(), vec![None, None]).unwrap();

    let stats = column_summary(&df, &["Con1", "Con2"]).unwrap();
    assert_eq!(stats[1].1.count, 0);
    assert!(stats[1].1.mean.is_nan());
}
