use crate::PerfError;
use crate::archive;
use crate::features::FeatureCatalog;
use crate::report::PriorReport;
use crate::solution;
use crate::value::CellValue;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Instance keys end with the graph-file extension; the best-known catalog
/// keys instances without it, and solution artifacts swap it for `.sol`.
pub const GRAPH_EXTENSION: &str = ".col";
pub const SOLUTION_EXTENSION: &str = ".sol";

/// Multi-run layouts may nest the actual artifacts one level deeper.
const CERTIFICATES_DIR: &str = "certificates";

/// Results-root layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One directory per algorithm, artifacts directly inside.
    SingleRun,
    /// One directory per run, each holding one directory per algorithm,
    /// each optionally holding a `certificates` directory with the artifacts.
    MultiRun,
}

/// The merged state of one instance.
#[derive(Debug, Clone)]
pub struct PerformanceRecord {
    /// Best-known optimum when the catalog has one, else the best value
    /// observed so far.
    pub best: CellValue,
    /// Running minimum chromatic number across history and this run's scans.
    pub best_performance: u64,
    /// Result-column-key → recorded value.
    pub results: FxHashMap<String, CellValue>,
}

/// The engine's output: records keyed by instance, plus the orderings the
/// writer needs for a deterministic file.
pub struct Report {
    /// Instance keys in feature-catalog order.
    pub order: Vec<String>,
    /// Sorted union of every result-column-key ever observed.
    pub columns: Vec<String>,
    pub records: FxHashMap<String, PerformanceRecord>,
}

/// One scannable result directory and the column key it reports under.
struct ResultSource {
    key: String,
    dir: PathBuf,
}

/// Merge prior output, the best-known catalog, and a fresh scan of the
/// results root into one record per feature-catalog instance.
///
/// Precedence, per field: `best` is pinned to the best-known catalog when an
/// entry exists (the catalog is authoritative even if a scanned result beats
/// it), else it equals `best_performance`. `best_performance` is the minimum
/// over the carried-forward value, the instance's vertex count, a numeric
/// catalog optimum, and every value decoded this run. Result columns prefer
/// fresh scans over carried-forward values; carried-forward values are never
/// replaced by a missing marker just because this run had nothing to rescan.
pub fn aggregate(
    features: &FeatureCatalog,
    best_known: &FxHashMap<String, CellValue>,
    prior: Option<&PriorReport>,
    results_root: &Path,
    mode: Mode,
) -> Result<Report, PerfError> {
    let sources = discover_sources(results_root, mode)?;
    println!("[perftab] Found {} result directory(ies)", sources.len());

    // Column union: everything the previous report recorded plus everything
    // discovered this run. A column must never silently disappear.
    let columns: Vec<String> = prior
        .map(|p| p.columns.clone())
        .unwrap_or_default()
        .into_iter()
        .chain(sources.iter().map(|s| s.key.clone()))
        .sorted()
        .dedup()
        .collect();

    // Seed one record per catalog instance, carrying prior values forward.
    let mut order = Vec::with_capacity(features.len());
    let mut records: FxHashMap<String, PerformanceRecord> = FxHashMap::default();
    for (instance, row) in features.iter() {
        order.push(instance.to_string());
        let seeded = prior.and_then(|p| p.rows.get(instance));
        let mut best_performance = seeded
            .and_then(|r| r.best_performance.as_number())
            .unwrap_or(row.num_vertices);
        let results = seeded.map(|r| r.results.clone()).unwrap_or_default();
        // A hand-edited prior file may record values below its own
        // best_performance; the running minimum covers them regardless.
        for value in results.values() {
            if let Some(n) = value.as_number() {
                best_performance = best_performance.min(n);
            }
        }
        records.insert(
            instance.to_string(),
            PerformanceRecord {
                best: CellValue::Missing,
                best_performance,
                results,
            },
        );
    }

    // Scan each result directory. Decompressed siblings live exactly as long
    // as the scan of their directory.
    for source in &sources {
        let scratch = archive::decompress_dir(&source.dir)?;
        if !scratch.is_empty() {
            println!(
                "[perftab] {}: decompressed {} archive(s)",
                source.key,
                scratch.len()
            );
        }

        let mut found = 0usize;
        for instance in features.instances() {
            let Some(record) = records.get_mut(instance) else {
                continue;
            };
            let artifact = source.dir.join(solution_file_name(instance));
            if artifact.is_file() {
                match solution::chromatic_number(&artifact) {
                    Ok(chromatic) => {
                        let chromatic = chromatic as u64;
                        record.best_performance = record.best_performance.min(chromatic);
                        record
                            .results
                            .insert(source.key.clone(), CellValue::Number(chromatic));
                        found += 1;
                    }
                    Err(e) => {
                        eprintln!("[perftab] warning: {}", e);
                        record.results.insert(source.key.clone(), CellValue::Missing);
                    }
                }
            } else if !record.results.contains_key(&source.key) {
                record.results.insert(source.key.clone(), CellValue::Missing);
            }
        }
        drop(scratch);
        println!("[perftab] {}: {} solution(s)", source.key, found);
    }

    // Finalize `best` per instance against the best-known catalog.
    for (instance, record) in records.iter_mut() {
        match best_known.get(best_known_key(instance)) {
            Some(CellValue::Number(optimum)) => {
                record.best = CellValue::Number(*optimum);
                record.best_performance = record.best_performance.min(*optimum);
            }
            Some(CellValue::Text(text)) => {
                // An opaque catalog entry (annotation, open bound) still pins
                // `best`, but cannot constrain the observed minimum.
                record.best = CellValue::Text(text.clone());
            }
            Some(CellValue::Missing) | None => {
                record.best = CellValue::Number(record.best_performance);
            }
        }
    }

    Ok(Report {
        order,
        columns,
        records,
    })
}

/// The best-known catalog keys instances without the graph-file extension.
fn best_known_key(instance: &str) -> &str {
    instance.strip_suffix(GRAPH_EXTENSION).unwrap_or(instance)
}

/// Artifact name for an instance: graph extension swapped for `.sol`.
fn solution_file_name(instance: &str) -> String {
    let stem = instance.strip_suffix(GRAPH_EXTENSION).unwrap_or(instance);
    format!("{}{}", stem, SOLUTION_EXTENSION)
}

fn discover_sources(results_root: &Path, mode: Mode) -> Result<Vec<ResultSource>, PerfError> {
    let mut sources = Vec::new();

    if !results_root.is_dir() {
        eprintln!(
            "[perftab] warning: results root {} does not exist; nothing to scan",
            results_root.display()
        );
        return Ok(sources);
    }

    match mode {
        Mode::SingleRun => {
            for dir in subdirectories(results_root)? {
                sources.push(ResultSource {
                    key: directory_name(&dir),
                    dir,
                });
            }
        }
        Mode::MultiRun => {
            for run_dir in subdirectories(results_root)? {
                let run = directory_name(&run_dir);
                for algo_dir in subdirectories(&run_dir)? {
                    let algo = directory_name(&algo_dir);
                    let certificates = algo_dir.join(CERTIFICATES_DIR);
                    let dir = if certificates.is_dir() {
                        certificates
                    } else {
                        algo_dir
                    };
                    sources.push(ResultSource {
                        key: format!("{}_{}", algo, run),
                        dir,
                    });
                }
            }
        }
    }

    sources.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(sources)
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>, PerfError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn directory_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
