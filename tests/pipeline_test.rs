use std::fs;
use std::path::Path;

use tabrs::pipeline::{run_all, Stage};
use tabrs::Error;

fn write_inputs(dir: &Path) {
    fs::write(
        dir.join("Superplus.csv"),
        "Sex,Income\nM,20\nM,30\nF,50\n",
    )
    .unwrap();
    fs::write(
        dir.join("Heather.csv"),
        "Frequencies,Unnamed: 1,Unnamed: 2\n\
         Absent,10,5\n\
         Sparse,30,15\n\
         Abundant,60,30\n\
         Total,100,50\n",
    )
    .unwrap();
    fs::write(
        dir.join("Diets.csv"),
        "Diet,Wtloss\nA,1.5\nA,3.0\nA,2.0\nB,-4.0\nB,0.5\n",
    )
    .unwrap();
    fs::write(dir.join("Designs.csv"), "Store,Con1,Con2\n1,40,35\n2,20,25\n").unwrap();
    fs::write(
        dir.join("Brandprefs.csv"),
        "Area,Brand\n1,A\n1,A\n1,A\n1,B\n1,B\n2,A\n2,B\n2,B\n2,B\n",
    )
    .unwrap();
}

fn read_output(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn test_full_batch_run_writes_expected_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let reports = run_all(dir.path(), dir.path(), false);
    assert_eq!(reports.len(), 5);
    for report in &reports {
        assert!(
            report.succeeded(),
            "{} failed: {:?}",
            report.dataset,
            report.error
        );
    }

    assert_eq!(
        read_output(dir.path(), "Superplus_Summary.csv"),
        "Sex,Count,Mean,Median,SD,Min,Max\n\
         F,1,50.0,50.0,,50.0,50.0\n\
         M,2,25.0,25.0,7.071,20.0,30.0\n"
    );

    // The stray header row and the totals footer are discarded; percentages
    // are over each location's own total.
    assert_eq!(
        read_output(dir.path(), "Heather_Percentages.csv"),
        "Prevalence,Location A,Location B,Pct_A,Pct_B\n\
         Absent,10,5,10.0,10.0\n\
         Sparse,30,15,30.0,30.0\n\
         Abundant,60,30,60.0,60.0\n"
    );

    assert_eq!(
        read_output(dir.path(), "Diet_Summaries.csv"),
        "Diet,Count,Mean,Median,SD,Min,Max\n\
         A,3,2.167,2.0,0.764,1.5,3.0\n\
         B,2,-1.75,-1.75,3.182,-4.0,0.5\n"
    );

    // Ten bins per diet, zero-filled, interval labels quoted for the comma.
    let hist = read_output(dir.path(), "Diet_Histogram.csv");
    assert_eq!(hist.lines().count(), 21);
    assert!(hist.starts_with("Diet,Class,Frequency,Relative_Freq\n"));
    assert!(hist.contains("A,\"(0, 2]\",2,0.6667\n"));
    assert!(hist.contains("A,\"(2, 4]\",1,0.3333\n"));
    assert!(hist.contains("A,\"(12, 14]\",0,0.0\n"));
    assert!(hist.contains("B,\"(-6, -4]\",1,0.5\n"));
    assert!(hist.contains("B,\"(0, 2]\",1,0.5\n"));

    assert_eq!(
        read_output(dir.path(), "Designs_Summary.csv"),
        ",Con1,Con2\n\
         mean,30.0,30.0\n\
         median,30.0,30.0\n\
         std,14.142,7.071\n\
         min,20.0,25.0\n\
         max,40.0,35.0\n"
    );
    assert_eq!(
        read_output(dir.path(), "Designs_Differences.csv"),
        "Store,Con1,Con2,Diff\n1,40,35,5\n2,20,25,-5\n"
    );

    assert_eq!(
        read_output(dir.path(), "BrandPrefs_Percentages.csv"),
        "Area,Brand,Count,Total,Pct\n\
         1,A,3,5,60.0\n\
         1,B,2,5,40.0\n\
         2,A,1,4,25.0\n\
         2,B,3,4,75.0\n"
    );
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    run_all(dir.path(), dir.path(), false);
    let first: Vec<Vec<u8>> = OUTPUTS
        .iter()
        .map(|name| fs::read(dir.path().join(name)).unwrap())
        .collect();

    run_all(dir.path(), dir.path(), false);
    for (name, before) in OUTPUTS.iter().zip(&first) {
        let after = fs::read(dir.path().join(name)).unwrap();
        assert_eq!(&after, before, "{} changed between runs", name);
    }
}

const OUTPUTS: [&str; 6] = [
    "Superplus_Summary.csv",
    "Heather_Percentages.csv",
    "Diet_Summaries.csv",
    "Diet_Histogram.csv",
    "Designs_Summary.csv",
    "BrandPrefs_Percentages.csv",
];

#[test]
fn test_failures_stay_isolated_per_dataset() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    // Break two inputs: a wrong Superplus header and a missing Diets file.
    fs::write(dir.path().join("Superplus.csv"), "Gender,Income\nM,20\n").unwrap();
    fs::remove_file(dir.path().join("Diets.csv")).unwrap();

    let reports = run_all(dir.path(), dir.path(), false);

    let superplus = &reports[0];
    assert!(!superplus.succeeded());
    let (stage, err) = superplus.error.as_ref().unwrap();
    assert_eq!(*stage, Stage::Load);
    assert!(matches!(err, Error::SchemaMismatch { .. }));
    assert!(superplus.tables.is_empty());

    let diets = &reports[2];
    let (stage, err) = diets.error.as_ref().unwrap();
    assert_eq!(*stage, Stage::Load);
    assert!(matches!(err, Error::Io(_)));

    // The intact datasets still run to completion.
    assert!(reports[1].succeeded());
    assert!(reports[3].succeeded());
    assert!(reports[4].succeeded());
    assert!(dir.path().join("Heather_Percentages.csv").exists());
    assert!(dir.path().join("Designs_Differences.csv").exists());
    assert!(!dir.path().join("Superplus_Summary.csv").exists());
}

#[test]
fn test_heather_with_no_valid_rows_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    fs::write(
        dir.path().join("Heather.csv"),
        "Frequencies,Unnamed: 1,Unnamed: 2\nTotal,100,50\n",
    )
    .unwrap();

    let reports = run_all(dir.path(), dir.path(), false);
    assert!(reports[1].succeeded());
    assert_eq!(
        read_output(dir.path(), "Heather_Percentages.csv"),
        "Prevalence,Location A,Location B,Pct_A,Pct_B\n"
    );
}
