use perftab::aggregate::{self, Mode};
use perftab::features::FeatureCatalog;
use perftab::report;
use perftab::value::CellValue;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;

fn load_features(base: &Path) -> FeatureCatalog {
    let path = base.join("features.csv");
    fs::write(
        &path,
        "feature_source,feature_num_vertices\na.col,20\nb.col,15\nc.col,12\n",
    )
    .unwrap();
    FeatureCatalog::load(&path).unwrap()
}

fn write_solution(dir: &Path, name: &str, labels: &[i64]) {
    fs::create_dir_all(dir).unwrap();
    let content = labels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(dir.join(name), content).unwrap();
}

/// Multi-run aggregation keys columns as {algorithm}_{run} and fills the
/// whole grid: every column exists for every instance, NaN where no artifact
/// was ever seen.
#[test]
fn test_dense_grid_over_runs_and_algorithms() {
    let temp_dir = tempfile::tempdir().unwrap();
    let features = load_features(temp_dir.path());
    let results_root = temp_dir.path().join("results");

    // Two runs, two algorithms, artifacts scattered unevenly. run1's greedy
    // results sit in a nested certificates directory.
    write_solution(
        &results_root.join("run1").join("greedy").join("certificates"),
        "a.sol",
        &[1, 2],
    );
    write_solution(&results_root.join("run1").join("tabu"), "a.sol", &[1, 2, 3]);
    write_solution(&results_root.join("run1").join("tabu"), "b.sol", &[1, 2]);
    write_solution(&results_root.join("run2").join("greedy"), "c.sol", &[1]);

    let merged = aggregate::aggregate(
        &features,
        &FxHashMap::default(),
        None,
        &results_root,
        Mode::MultiRun,
    )
    .unwrap();

    assert_eq!(
        merged.columns,
        vec!["greedy_run1", "greedy_run2", "tabu_run1"],
        "column keys are algorithm_run, sorted"
    );

    let output = temp_dir.path().join("perf.csv");
    report::write_report(&merged, &output).unwrap();
    let parsed = report::read_prior(&output).unwrap().unwrap();

    // Every instance row carries every column.
    for instance in ["a.col", "b.col", "c.col"] {
        let row = &parsed.rows[instance];
        for column in ["greedy_run1", "greedy_run2", "tabu_run1"] {
            assert!(
                row.results.contains_key(column),
                "{} must have a cell for {}",
                instance,
                column
            );
        }
    }

    let a = &parsed.rows["a.col"];
    assert_eq!(a.results["greedy_run1"], CellValue::Number(2));
    assert_eq!(a.results["tabu_run1"], CellValue::Number(3));
    assert_eq!(a.results["greedy_run2"], CellValue::Missing);

    let c = &parsed.rows["c.col"];
    assert_eq!(c.results["greedy_run2"], CellValue::Number(1));
    assert_eq!(c.results["greedy_run1"], CellValue::Missing);
    assert_eq!(c.results["tabu_run1"], CellValue::Missing);
}

/// Gzip-compressed certificates decode the same as plain ones and leave no
/// scratch files behind.
#[test]
fn test_compressed_certificates() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let temp_dir = tempfile::tempdir().unwrap();
    let features = load_features(temp_dir.path());
    let results_root = temp_dir.path().join("results");
    let certificates = results_root.join("run1").join("exact").join("certificates");
    fs::create_dir_all(&certificates).unwrap();

    let mut encoder = GzEncoder::new(
        fs::File::create(certificates.join("b.sol.gz")).unwrap(),
        Compression::default(),
    );
    encoder.write_all(b"4\n4\n7\n").unwrap();
    encoder.finish().unwrap();

    let merged = aggregate::aggregate(
        &features,
        &FxHashMap::default(),
        None,
        &results_root,
        Mode::MultiRun,
    )
    .unwrap();

    assert_eq!(
        merged.records["b.col"].results["exact_run1"],
        CellValue::Number(2)
    );
    assert!(
        !certificates.join("b.sol").exists(),
        "scratch file removed after the scan"
    );
}
