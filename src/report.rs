use crate::PerfError;
use crate::aggregate::Report;
use crate::value::CellValue;
use rustc_hash::FxHashMap;
use std::path::Path;

/// Columns owned by the report itself; everything else is a result column.
pub const RESERVED_COLUMNS: [&str; 3] = ["instance_name", "best", "best_performance"];

/// One instance row carried forward from a previous run.
pub struct PriorRow {
    pub best: CellValue,
    pub best_performance: CellValue,
    pub results: FxHashMap<String, CellValue>,
}

/// A previous run's report, re-parsed to seed the incremental merge.
pub struct PriorReport {
    /// Non-reserved column keys, in header order.
    pub columns: Vec<String>,
    pub rows: FxHashMap<String, PriorRow>,
}

/// Read a previous report if one exists at `path`. Numeric cells coerce back
/// from their serialized form; the missing marker round-trips to `Missing`.
pub fn read_prior(path: &Path) -> Result<Option<PriorReport>, PerfError> {
    if !path.exists() {
        return Ok(None);
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let name_idx = headers
        .iter()
        .position(|h| h == "instance_name")
        .ok_or_else(|| {
            PerfError::Catalog(format!(
                "previous report {}: no instance_name column",
                path.display()
            ))
        })?;
    let best_idx = headers.iter().position(|h| h == "best");
    let best_performance_idx = headers.iter().position(|h| h == "best_performance");

    let result_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !RESERVED_COLUMNS.contains(h))
        .map(|(idx, h)| (idx, h.to_string()))
        .collect();

    let mut rows = FxHashMap::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                // Hand-edited output; the row's history is rebuilt from the
                // vertex-count bound instead.
                eprintln!(
                    "[perftab] warning: skipping malformed row in previous report {}: {}",
                    path.display(),
                    e
                );
                continue;
            }
        };
        let Some(instance) = record.get(name_idx).map(str::trim) else {
            continue;
        };
        if instance.is_empty() {
            continue;
        }

        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(CellValue::parse)
                .unwrap_or(CellValue::Missing)
        };
        let mut results = FxHashMap::default();
        for (idx, column) in &result_columns {
            results.insert(column.clone(), cell(Some(*idx)));
        }

        rows.insert(
            instance.to_string(),
            PriorRow {
                best: cell(best_idx),
                best_performance: cell(best_performance_idx),
                results,
            },
        );
    }

    Ok(Some(PriorReport {
        columns: result_columns.into_iter().map(|(_, name)| name).collect(),
        rows,
    }))
}

/// Serialize the merged records. Header is the reserved columns followed by
/// the sorted result-column union; rows follow feature-catalog order; cells
/// with no value serialize as the missing marker. Re-running with unchanged
/// inputs reproduces the file byte for byte.
pub fn write_report(report: &Report, path: &Path) -> Result<(), PerfError> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = RESERVED_COLUMNS.to_vec();
    header.extend(report.columns.iter().map(String::as_str));
    writer.write_record(&header)?;

    for instance in &report.order {
        let Some(record) = report.records.get(instance) else {
            continue;
        };
        let mut row = Vec::with_capacity(header.len());
        row.push(instance.clone());
        row.push(record.best.to_string());
        row.push(record.best_performance.to_string());
        for column in &report.columns {
            row.push(
                record
                    .results
                    .get(column)
                    .unwrap_or(&CellValue::Missing)
                    .to_string(),
            );
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
