use crate::PerfError;
use crate::value::CellValue;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;

/// Key column names seen across catalog revisions.
const KEY_COLUMNS: [&str; 2] = ["Instance", "Source"];
const VALUE_COLUMN: &str = "best";

enum Variant {
    Markdown,
    Delimited,
}

/// Load the best-known-solutions catalog into `{instance → optimum}`.
///
/// The catalog schema has drifted over time: a markdown pipe table in older
/// deployments, a named-column CSV in newer ones. The variant is picked by
/// extension, or by sniffing the first non-blank line when the extension is
/// inconclusive. Non-integer optima are retained as opaque text.
pub fn load_best_known(path: &Path) -> Result<FxHashMap<String, CellValue>, PerfError> {
    let text = fs::read_to_string(path)?;
    match detect_variant(path, &text) {
        Variant::Markdown => Ok(parse_markdown(&text, path)),
        Variant::Delimited => parse_delimited(&text, path),
    }
}

fn detect_variant(path: &Path, text: &str) -> Variant {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md") | Some("markdown") => Variant::Markdown,
        Some("csv") => Variant::Delimited,
        _ => {
            let first = text.lines().find(|line| !line.trim().is_empty());
            if first.is_some_and(|line| line.trim_start().starts_with('|')) {
                Variant::Markdown
            } else {
                Variant::Delimited
            }
        }
    }
}

/// Markdown variant: first `|`-prefixed line is the header, the second is the
/// separator and is skipped, every later `|`-prefixed line is a data row.
/// Rows whose cell count does not match the header are dropped; hand-edited
/// tables get them wrong routinely.
fn parse_markdown(text: &str, path: &Path) -> FxHashMap<String, CellValue> {
    let mut best = FxHashMap::default();

    let table_lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('|'))
        .collect();

    if table_lines.is_empty() {
        eprintln!(
            "[perftab] warning: no markdown table found in {}",
            path.display()
        );
        return best;
    }

    let header = split_row(table_lines[0]);
    let Some(key_idx) = KEY_COLUMNS
        .iter()
        .find_map(|name| header.iter().position(|h| h == name))
    else {
        eprintln!(
            "[perftab] warning: {} has no Instance or Source column",
            path.display()
        );
        return best;
    };
    let Some(value_idx) = header
        .iter()
        .position(|h| h.eq_ignore_ascii_case(VALUE_COLUMN))
    else {
        eprintln!("[perftab] warning: {} has no best column", path.display());
        return best;
    };

    for row_line in table_lines.iter().skip(2) {
        let cells = split_row(row_line);
        if cells.len() != header.len() {
            continue;
        }
        let key = cells[key_idx].trim();
        if key.is_empty() {
            continue;
        }
        best.insert(key.to_string(), CellValue::parse(&cells[value_idx]));
    }

    best
}

fn split_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// CSV variant: named columns, same key drift as the markdown tables.
/// A malformed row is skipped; a missing key or value column means the file
/// is not a best-known catalog at all and the load fails.
fn parse_delimited(text: &str, path: &Path) -> Result<FxHashMap<String, CellValue>, PerfError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let key_idx = KEY_COLUMNS
        .iter()
        .find_map(|name| headers.iter().position(|h| h.trim() == *name))
        .ok_or_else(|| {
            PerfError::Catalog(format!(
                "best-known catalog {}: no Instance or Source column",
                path.display()
            ))
        })?;
    let value_idx = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(VALUE_COLUMN))
        .ok_or_else(|| {
            PerfError::Catalog(format!(
                "best-known catalog {}: no best column",
                path.display()
            ))
        })?;

    let mut best = FxHashMap::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                eprintln!(
                    "[perftab] warning: skipping malformed row in {}: {}",
                    path.display(),
                    e
                );
                continue;
            }
        };
        let Some(key) = record.get(key_idx).map(str::trim) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        best.insert(
            key.to_string(),
            CellValue::parse(record.get(value_idx).unwrap_or("")),
        );
    }

    Ok(best)
}
