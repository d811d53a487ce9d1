//! Data-quality metrics supplied from outside the core.
//!
//! Computing these needs row scans, which belong to the database layer. This
//! module only defines the shape the analytics consume and an in-memory
//! snapshot loaded from JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lenient;

/// Placeholder rendered wherever a metric is unavailable.
pub const NO_DATA: &str = "—";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnMetrics {
    /// `None` when the scan could not compute it.
    #[serde(deserialize_with = "lenient::number")]
    pub null_pct: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub distinct_pct: Option<f64>,
    #[serde(deserialize_with = "lenient::list")]
    pub examples: Vec<String>,
    #[serde(deserialize_with = "lenient::record")]
    pub numeric: Option<NumericSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericSummary {
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableMetrics {
    #[serde(deserialize_with = "lenient::number")]
    pub orphan_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub duplicate_rate: Option<f64>,
    pub columns: IndexMap<String, ColumnMetrics>,
}

/// Source of per-column and per-table quality metrics.
///
/// A missing key means "no data" and must never be treated as an error.
pub trait ColumnMetricsProvider: Send + Sync {
    fn column_metrics(&self, table: &str, column: &str) -> Option<&ColumnMetrics>;
    fn table_metrics(&self, table: &str) -> Option<&TableMetrics>;
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Invalid metrics JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metrics keyed by table then column, as produced by the backend scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
    pub tables: IndexMap<String, TableMetrics>,
}

impl MetricsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(input: &str) -> Result<Self, MetricsError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn insert_column(&mut self, table: &str, column: &str, metrics: ColumnMetrics) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .columns
            .insert(column.to_string(), metrics);
    }

    pub fn set_table_rates(
        &mut self,
        table: &str,
        orphan_rate: Option<f64>,
        duplicate_rate: Option<f64>,
    ) {
        let entry = self.tables.entry(table.to_string()).or_default();
        entry.orphan_rate = orphan_rate;
        entry.duplicate_rate = duplicate_rate;
    }
}

impl ColumnMetricsProvider for MetricsSnapshot {
    fn column_metrics(&self, table: &str, column: &str) -> Option<&ColumnMetrics> {
        self.tables.get(table)?.columns.get(column)
    }

    fn table_metrics(&self, table: &str) -> Option<&TableMetrics> {
        self.tables.get(table)
    }
}

/// A percentage that may be missing, rendered with a neutral placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pct(pub Option<f64>);

impl fmt::Display for Pct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) if v.is_finite() => write!(f, "{:.1}%", v),
            _ => f.write_str(NO_DATA),
        }
    }
}

/// Null percentage for one column, or "no data".
pub fn null_pct(provider: &dyn ColumnMetricsProvider, table: &str, column: &str) -> Pct {
    Pct(provider.column_metrics(table, column).and_then(|m| m.null_pct))
}

/// Distinct percentage for one column, or "no data".
pub fn distinct_pct(provider: &dyn ColumnMetricsProvider, table: &str, column: &str) -> Pct {
    Pct(provider.column_metrics(table, column).and_then(|m| m.distinct_pct))
}
