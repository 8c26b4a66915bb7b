use crate::PerfError;
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

/// Compute the chromatic number of a solution artifact: the count of distinct
/// color labels, one label per line. Duplicate labels collapse, so this is
/// neither the line count nor the maximum label.
pub fn chromatic_number(path: &Path) -> Result<usize, PerfError> {
    let text = fs::read_to_string(path)?;
    let mut labels: FxHashSet<i64> = FxHashSet::default();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let label: i64 = trimmed.parse().map_err(|_| {
            PerfError::Solution(format!(
                "non-integer color label {:?} in {}",
                trimmed,
                path.display()
            ))
        })?;
        labels.insert(label);
    }

    Ok(labels.len())
}
