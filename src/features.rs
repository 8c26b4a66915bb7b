use crate::PerfError;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;

/// One row of the instance feature catalog. Column names follow the catalog
/// generator; columns beyond these two are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureRow {
    #[serde(rename = "feature_source")]
    pub source: String,

    #[serde(rename = "feature_num_vertices")]
    pub num_vertices: u64,
}

/// The authoritative instance list, in catalog file order.
///
/// Every instance here becomes exactly one output row; the vertex count is
/// the trivially valid upper bound used to seed `best_performance` (a graph
/// can always be colored with one color per vertex).
pub struct FeatureCatalog {
    order: Vec<String>,
    rows: FxHashMap<String, FeatureRow>,
}

impl FeatureCatalog {
    /// Load the catalog. A row missing its identifier or vertex count is
    /// fatal: without the upper bound the instance cannot be aggregated.
    pub fn load(path: &Path) -> Result<Self, PerfError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            PerfError::Catalog(format!("feature catalog {}: {}", path.display(), e))
        })?;

        let mut order = Vec::new();
        let mut rows: FxHashMap<String, FeatureRow> = FxHashMap::default();

        for result in reader.deserialize() {
            let row: FeatureRow = result.map_err(|e| {
                PerfError::Catalog(format!("feature catalog {}: {}", path.display(), e))
            })?;
            if row.source.trim().is_empty() {
                return Err(PerfError::Catalog(format!(
                    "feature catalog {}: row with empty instance identifier",
                    path.display()
                )));
            }
            if !rows.contains_key(&row.source) {
                order.push(row.source.clone());
            }
            rows.insert(row.source.clone(), row);
        }

        Ok(Self { order, rows })
    }

    /// Instance keys in catalog order.
    pub fn instances(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Rows in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureRow)> {
        self.order
            .iter()
            .filter_map(|key| self.rows.get(key).map(|row| (key.as_str(), row)))
    }

    pub fn get(&self, instance: &str) -> Option<&FeatureRow> {
        self.rows.get(instance)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
