use tabrs::{DataFrame, Value};

fn col(values: &[Option<i64>]) -> Vec<Option<Value>> {
    values.iter().map(|v| v.map(Value::Int)).collect()
}

#[test]
fn test_frame_creation() {
    let df = DataFrame::new();
    assert_eq!(df.column_count(), 0);
    assert_eq!(df.row_count(), 0);
    assert!(df.column_names().is_empty());
}

#[test]
fn test_add_column_and_access() {
    let mut df = DataFrame::new();
    df.add_column("a".to_string(), col(&[Some(1), Some(2), None]))
        .unwrap();

    assert_eq!(df.column_count(), 1);
    assert_eq!(df.row_count(), 3);
    assert!(df.contains_column("a"));
    assert!(!df.contains_column("b"));
    assert_eq!(df.get("a", 0), Some(&Value::Int(1)));
    assert_eq!(df.get("a", 2), None);
    assert!(df.column("missing").is_err());
}

#[test]
fn test_add_column_length_mismatch() {
    let mut df = DataFrame::new();
    df.add_column("a".to_string(), col(&[Some(1), Some(2)]))
        .unwrap();
    let result = df.add_column("b".to_string(), col(&[Some(1)]));
    assert!(result.is_err());
}

#[test]
fn test_add_column_duplicate_name() {
    let mut df = DataFrame::new();
    df.add_column("a".to_string(), col(&[Some(1)])).unwrap();
    assert!(df.add_column("a".to_string(), col(&[Some(2)])).is_err());
}

#[test]
fn test_drop_na_keeps_complete_rows() {
    let mut df = DataFrame::new();
    df.add_column("a".to_string(), col(&[Some(1), None, Some(3)]))
        .unwrap();
    df.add_column("b".to_string(), col(&[Some(4), Some(5), Some(6)]))
        .unwrap();

    df.drop_na();
    assert_eq!(df.row_count(), 2);
    assert_eq!(df.get("a", 1), Some(&Value::Int(3)));
    assert_eq!(df.get("b", 1), Some(&Value::Int(6)));
}

#[test]
fn test_retain_rows_preserves_order() {
    let mut df = DataFrame::new();
    df.add_column("a".to_string(), col(&[Some(1), Some(2), Some(3), Some(4)]))
        .unwrap();
    df.retain_rows(&[true, false, true, false]).unwrap();
    assert_eq!(df.row_count(), 2);
    assert_eq!(df.get("a", 0), Some(&Value::Int(1)));
    assert_eq!(df.get("a", 1), Some(&Value::Int(3)));

    // Mask length must match the row count.
    assert!(df.retain_rows(&[true]).is_err());
}

#[test]
fn test_set_column_name() {
    let mut df = DataFrame::new();
    df.add_column("Frequencies".to_string(), col(&[Some(1)]))
        .unwrap();
    df.set_column_name(0, "Prevalence").unwrap();
    assert_eq!(df.column_names(), &["Prevalence"]);
    assert!(df.contains_column("Prevalence"));
    assert!(!df.contains_column("Frequencies"));
}

#[test]
fn test_cast_column_to_int() {
    let mut df = DataFrame::new();
    df.add_column(
        "n".to_string(),
        vec![
            Some(Value::Str("10".to_string())),
            Some(Value::Str("5.0".to_string())),
            Some(Value::Float(7.0)),
            None,
        ],
    )
    .unwrap();

    df.cast_column_to_int("n").unwrap();
    assert_eq!(df.get("n", 0), Some(&Value::Int(10)));
    assert_eq!(df.get("n", 1), Some(&Value::Int(5)));
    assert_eq!(df.get("n", 2), Some(&Value::Int(7)));
    assert_eq!(df.get("n", 3), None);
}

#[test]
fn test_cast_column_to_int_rejects_fractions() {
    let mut df = DataFrame::new();
    df.add_column("n".to_string(), vec![Some(Value::Str("2.5".to_string()))])
        .unwrap();
    assert!(df.cast_column_to_int("n").is_err());

    let mut df = DataFrame::new();
    df.add_column("n".to_string(), vec![Some(Value::Str("many".to_string()))])
        .unwrap();
    assert!(df.cast_column_to_int("n").is_err());
}

#[test]
fn test_pairwise_difference() {
    let mut df = DataFrame::new();
    df.add_column("x".to_string(), col(&[Some(40), Some(20), None]))
        .unwrap();
    df.add_column("y".to_string(), col(&[Some(35), Some(25), Some(1)]))
        .unwrap();

    let diff = df.pairwise_difference("x", "y").unwrap();
    assert_eq!(diff, vec![Some(Value::Int(5)), Some(Value::Int(-5)), None]);
}

#[test]
fn test_pairwise_difference_mixed_types_yields_float() {
    let mut df = DataFrame::new();
    df.add_column("x".to_string(), vec![Some(Value::Float(1.5))])
        .unwrap();
    df.add_column("y".to_string(), vec![Some(Value::Int(1))])
        .unwrap();

    let diff = df.pairwise_difference("x", "y").unwrap();
    assert_eq!(diff, vec![Some(Value::Float(0.5))]);
}

#[test]
fn test_f64_column_rejects_strings() {
    let mut df = DataFrame::new();
    df.add_column("s".to_string(), vec![Some(Value::Str("x".to_string()))])
        .unwrap();
    assert!(df.f64_column("s").is_err());
    assert!(df.i64_column("s").is_err());
}
