use std::fmt;

/// Serialized token for a cell with no value. Distinguishable from a genuine
/// zero on re-parse.
pub const MISSING_MARKER: &str = "NaN";

/// One cell of the performance report.
///
/// Numeric cells hold chromatic numbers or optima. Non-integer values read
/// from a prior report or the best-known catalog are carried through as
/// opaque text rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Number(u64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Parse a serialized cell back into a value.
    ///
    /// All-digit cells coerce to numbers; the missing marker (and an empty
    /// cell) become `Missing`; everything else is retained verbatim.
    pub fn parse(raw: &str) -> CellValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == MISSING_MARKER {
            return CellValue::Missing;
        }
        match trimmed.parse::<u64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<u64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Missing => write!(f, "{}", MISSING_MARKER),
        }
    }
}
