//! Output records of the analytics pass.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::schema::ColumnRef;

/// Structural statistics over one schema.
///
/// Every field except `selected` is independent of the selected table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub table_count: usize,
    pub view_count: usize,
    pub column_count: usize,
    pub fk_count: usize,
    pub avg_columns_per_table: f64,
    pub pk_coverage_pct: u32,

    /// Per-table degree rows in schema order.
    pub tables: Vec<TableDegree>,
    pub orphans: Vec<String>,
    pub orphan_count: usize,
    pub sources: Vec<String>,
    pub source_count: usize,
    pub sinks: Vec<String>,
    pub sink_count: usize,

    pub top_hubs: Vec<Hub>,
    pub hubs: Vec<Hub>,
    pub top_hub_name: Option<String>,
    pub top_hub_degree: usize,

    pub fks_per_table: f64,
    pub connectivity_pct: f64,
    /// Directed density. Self-referencing keys count in the numerator only,
    /// so schemas with self references can exceed the simple-graph value.
    pub graph_density: f64,
    pub self_ref_count: usize,
    pub reciprocal_pairs_count: usize,
    pub dangling_fk_count: usize,
    pub component_count: usize,
    pub has_cycle: bool,

    pub type_distribution: Vec<TypeCount>,
    pub max_type_count: usize,

    pub earliest_created_ts: Option<DateTime<Utc>>,
    pub latest_updated_ts: Option<DateTime<Utc>>,
    pub total_approx_rows: u64,
    pub recently_updated: Vec<RecentTable>,

    pub quality: QualitySummary,
    pub selected: Option<SelectedTable>,
}

/// Foreign-key role of a table. Exactly one applies to every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableRole {
    /// No foreign keys in or out.
    Orphan,
    /// Only emits foreign keys.
    Source,
    /// Only referenced.
    Sink,
    /// Both referenced and referencing.
    Linked,
}

impl TableRole {
    pub fn classify(in_degree: usize, out_degree: usize) -> Self {
        match (in_degree, out_degree) {
            (0, 0) => Self::Orphan,
            (0, _) => Self::Source,
            (_, 0) => Self::Sink,
            _ => Self::Linked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDegree {
    pub name: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub degree: usize,
    pub role: TableRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hub {
    pub name: String,
    pub degree: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub type_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTable {
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedTable {
    pub name: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub column_count: usize,
}

/// Aggregated data-quality metrics. Empty when no provider is attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub measured_columns: usize,
    pub unmeasured_columns: usize,
    pub avg_null_pct: Option<f64>,
    pub avg_distinct_pct: Option<f64>,
    pub high_null_columns: Vec<ColumnRef>,
    pub tables_with_orphan_rows: Vec<String>,
    pub avg_duplicate_rate: Option<f64>,
}
