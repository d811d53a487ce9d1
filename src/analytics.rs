//! Structural statistics over a schema's foreign-key graph.

mod degree;
mod quality;
mod rollups;
mod stats;
mod topology;
mod type_histogram;

pub use stats::{
    GraphStats, Hub, QualitySummary, RecentTable, SelectedTable, TableDegree, TableRole,
    TypeCount,
};

use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::metrics::ColumnMetricsProvider;
use crate::schema::{Schema, TableKind};

use degree::{count_degrees, names_with_role, rank_hubs, table_degrees};
use quality::summarize_quality;
use rollups::rollup_meta;
use topology::FkGraph;
use type_histogram::type_distribution;

/// Analyze `schema` with default limits and no quality metrics.
pub fn analyze(schema: &Schema, selected: Option<&str>) -> GraphStats {
    Analyzer::default().analyze(schema, selected)
}

/// Configured analytics pass, optionally fed with quality metrics.
#[derive(Clone, Default)]
pub struct Analyzer<'m> {
    config: AnalyticsConfig,
    metrics: Option<&'m dyn ColumnMetricsProvider>,
}

impl<'m> Analyzer<'m> {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: &'m dyn ColumnMetricsProvider) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn analyze(&self, schema: &Schema, selected: Option<&str>) -> GraphStats {
        let table_count = schema.tables.len();
        let fk_count = schema.foreign_keys.len();
        let column_count = schema.column_count();

        // Phase 1: degrees and roles
        let counts = count_degrees(schema);
        let rows = table_degrees(schema, &counts);
        let orphans = names_with_role(&rows, TableRole::Orphan);
        let sources = names_with_role(&rows, TableRole::Source);
        let sinks = names_with_role(&rows, TableRole::Sink);

        // Phase 2: hub ranking
        let ranked = rank_hubs(&rows);
        let top_hubs: Vec<Hub> = ranked.iter().take(self.config.top_hubs).cloned().collect();
        let hubs: Vec<Hub> = ranked
            .iter()
            .take(self.config.expanded_hubs)
            .cloned()
            .collect();

        // Phase 3: graph structure
        let graph = FkGraph::new(schema);
        let self_ref_count = schema
            .foreign_keys
            .iter()
            .filter(|fk| fk.is_self_reference())
            .count();

        // Phase 4: ratios
        let pk_tables = schema.tables.iter().filter(|t| t.has_primary_key()).count();
        let pk_coverage_pct = ratio(pk_tables, table_count)
            .map(|r| (r * 100.0).round() as u32)
            .unwrap_or(0);
        let density = if table_count > 1 {
            fk_count as f64 / (table_count * (table_count - 1)) as f64
        } else {
            0.0
        };

        // Phase 5: columns, metadata and quality
        let type_distribution = type_distribution(schema);
        let max_type_count = type_distribution.first().map_or(0, |t| t.count);
        let rollup = rollup_meta(schema, self.config.recent_tables);
        let quality = summarize_quality(schema, self.metrics, self.config.high_null_threshold);

        let stats = GraphStats {
            table_count,
            view_count: schema
                .tables
                .iter()
                .filter(|t| t.kind == TableKind::View)
                .count(),
            column_count,
            fk_count,
            avg_columns_per_table: round_to(ratio(column_count, table_count).unwrap_or(0.0), 3),
            pk_coverage_pct,
            orphan_count: orphans.len(),
            source_count: sources.len(),
            sink_count: sinks.len(),
            top_hub_name: ranked.first().map(|h| h.name.clone()),
            top_hub_degree: ranked.first().map_or(0, |h| h.degree),
            fks_per_table: round_to(ratio(fk_count, table_count).unwrap_or(0.0), 3),
            connectivity_pct: round_to(
                ratio(table_count - orphans.len(), table_count).unwrap_or(0.0),
                3,
            ),
            graph_density: round_to(density, 3),
            self_ref_count,
            reciprocal_pairs_count: graph.reciprocal_pairs(),
            dangling_fk_count: graph.dangling_count(),
            component_count: graph.component_count(),
            has_cycle: graph.has_cycle(),
            max_type_count,
            type_distribution,
            earliest_created_ts: rollup.earliest_created,
            latest_updated_ts: rollup.latest_updated,
            total_approx_rows: rollup.total_approx_rows,
            recently_updated: rollup.recently_updated,
            quality,
            selected: selected.and_then(|name| select_table(schema, &rows, name)),
            tables: rows,
            orphans,
            sources,
            sinks,
            top_hubs,
            hubs,
        };

        debug!(
            tables = stats.table_count,
            foreign_keys = stats.fk_count,
            components = stats.component_count,
            has_cycle = stats.has_cycle,
            "analyzed schema"
        );

        stats
    }
}

/// Selection-scoped record; `None` when the name is not a schema table.
fn select_table(schema: &Schema, rows: &[TableDegree], name: &str) -> Option<SelectedTable> {
    let table = schema.table(name)?;
    let row = rows.iter().find(|r| r.name == name)?;
    Some(SelectedTable {
        name: table.name.clone(),
        in_degree: row.in_degree,
        out_degree: row.out_degree,
        column_count: table.columns.len(),
    })
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{ColumnMetrics, MetricsSnapshot};
    use crate::schema::{Column, ColumnRef, ForeignKey, Table, TableMeta};
    use chrono::{TimeZone, Utc};

    fn table(name: &str) -> Table {
        Table::new(name)
            .with_column(Column::pk("id", "INTEGER"))
            .with_column(Column::new("name", "text"))
    }

    fn fk(from: &str, to: &str) -> ForeignKey {
        ForeignKey::new(
            ColumnRef::new(from, format!("{}_id", to)),
            ColumnRef::new(to, "id"),
        )
    }

    fn schema(names: &[&str], fks: &[(&str, &str)]) -> Schema {
        Schema::new(
            names.iter().map(|n| table(n)).collect(),
            fks.iter().map(|(f, t)| fk(f, t)).collect(),
        )
    }

    #[test]
    fn test_empty_schema() {
        let stats = analyze(&Schema::default(), None);
        assert_eq!(stats.table_count, 0);
        assert_eq!(stats.avg_columns_per_table, 0.0);
        assert_eq!(stats.pk_coverage_pct, 0);
        assert_eq!(stats.fks_per_table, 0.0);
        assert_eq!(stats.connectivity_pct, 0.0);
        assert_eq!(stats.graph_density, 0.0);
        assert_eq!(stats.component_count, 0);
        assert!(!stats.has_cycle);
        assert!(stats.top_hub_name.is_none());
        assert!(stats.earliest_created_ts.is_none());
    }

    #[test]
    fn test_counts_and_ratios() {
        let mut s = schema(
            &["users", "orders", "items", "audit"],
            &[("orders", "users"), ("items", "orders")],
        );
        s.tables[3] = Table::new("audit").with_column(Column::new("line", "TEXT"));
        let stats = analyze(&s, None);

        assert_eq!(stats.table_count, 4);
        assert_eq!(stats.column_count, 7);
        assert_eq!(stats.fk_count, 2);
        assert_eq!(stats.avg_columns_per_table, 1.75);
        assert_eq!(stats.pk_coverage_pct, 75);
        assert_eq!(stats.fks_per_table, 0.5);
        assert_eq!(stats.connectivity_pct, 0.75);
        assert_eq!(stats.graph_density, 0.167);
        assert_eq!(stats.orphans, vec!["audit".to_string()]);
        assert_eq!(stats.sources, vec!["items".to_string()]);
        assert_eq!(stats.sinks, vec!["users".to_string()]);
        assert_eq!(stats.component_count, 2);
    }

    #[test]
    fn test_density_example() {
        let stats = analyze(&schema(&["a", "b", "c"], &[("a", "b"), ("b", "c")]), None);
        assert_eq!(stats.graph_density, 0.333);
    }

    #[test]
    fn test_density_counts_self_references() {
        let stats = analyze(&schema(&["a", "b"], &[("a", "b"), ("b", "a"), ("a", "a")]), None);
        assert_eq!(stats.graph_density, 1.5);
    }

    #[test]
    fn test_hub_ranking() {
        let s = schema(
            &["users", "orders", "items", "products", "tags"],
            &[
                ("orders", "users"),
                ("items", "orders"),
                ("items", "products"),
                ("products", "tags"),
            ],
        );
        let stats = analyze(&s, None);

        let top: Vec<(&str, usize)> = stats
            .top_hubs
            .iter()
            .map(|h| (h.name.as_str(), h.degree))
            .collect();
        assert_eq!(top, vec![("orders", 2), ("items", 2), ("products", 2)]);
        assert_eq!(stats.hubs.len(), 5);
        assert_eq!(stats.top_hub_name.as_deref(), Some("orders"));
        assert_eq!(stats.top_hub_degree, 2);
    }

    #[test]
    fn test_custom_hub_limits() {
        let s = schema(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let analyzer = Analyzer::new(AnalyticsConfig {
            top_hubs: 1,
            expanded_hubs: 2,
            ..AnalyticsConfig::default()
        });
        let stats = analyzer.analyze(&s, None);
        assert_eq!(stats.top_hubs.len(), 1);
        assert_eq!(stats.hubs.len(), 2);
        assert_eq!(stats.top_hubs[0].name, "b");
    }

    #[test]
    fn test_hubs_without_foreign_keys() {
        let stats = analyze(&schema(&["a", "b"], &[]), None);
        let top: Vec<(&str, usize)> = stats
            .top_hubs
            .iter()
            .map(|h| (h.name.as_str(), h.degree))
            .collect();
        assert_eq!(top, vec![("a", 0), ("b", 0)]);
        assert_eq!(stats.hubs.len(), 2);
        assert_eq!(stats.top_hub_name.as_deref(), Some("a"));
        assert_eq!(stats.top_hub_degree, 0);
    }

    #[test]
    fn test_pk_coverage_rounds() {
        let mut s = schema(&["a", "b", "c"], &[]);
        s.tables[2] = Table::new("c").with_column(Column::new("note", "TEXT"));
        assert_eq!(analyze(&s, None).pk_coverage_pct, 67);

        s.tables[1] = Table::new("b").with_column(Column::new("note", "TEXT"));
        assert_eq!(analyze(&s, None).pk_coverage_pct, 33);
    }

    #[test]
    fn test_cycle_example() {
        let cyclic = schema(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        assert!(analyze(&cyclic, None).has_cycle);

        let acyclic = schema(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        assert!(!analyze(&acyclic, None).has_cycle);
    }

    #[test]
    fn test_self_reference() {
        let stats = analyze(&schema(&["x"], &[("x", "x")]), None);
        assert_eq!(stats.self_ref_count, 1);
        assert!(stats.has_cycle);
        assert_eq!(stats.tables[0].role, TableRole::Linked);
        assert_eq!(stats.orphan_count, 0);
    }

    #[test]
    fn test_reciprocal_pairs() {
        let mut s = schema(&["a", "b"], &[("a", "b"), ("b", "a")]);
        assert_eq!(analyze(&s, None).reciprocal_pairs_count, 1);

        s.foreign_keys.push(ForeignKey::new(
            ColumnRef::new("a", "other_b_id"),
            ColumnRef::new("b", "id"),
        ));
        assert_eq!(analyze(&s, None).reciprocal_pairs_count, 1);
    }

    #[test]
    fn test_dangling_foreign_key() {
        let s = schema(&["orders"], &[("orders", "ghost")]);
        let stats = analyze(&s, None);

        assert_eq!(stats.tables.len(), 1);
        assert_eq!(stats.tables[0].out_degree, 1);
        assert_eq!(stats.dangling_fk_count, 1);
        assert!(stats.hubs.iter().all(|h| h.name != "ghost"));
        assert_eq!(stats.component_count, 1);
    }

    #[test]
    fn test_selection_only_changes_selected() {
        let s = schema(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let none = analyze(&s, None);
        let a = analyze(&s, Some("a"));
        let b = analyze(&s, Some("b"));

        assert_eq!(
            a.selected,
            Some(SelectedTable {
                name: "a".into(),
                in_degree: 0,
                out_degree: 1,
                column_count: 2,
            })
        );
        assert_eq!(b.selected.as_ref().unwrap().in_degree, 1);
        assert_eq!(GraphStats { selected: None, ..a }, none);
        assert_eq!(GraphStats { selected: None, ..b }, none);
    }

    #[test]
    fn test_unknown_selection() {
        let s = schema(&["a"], &[("a", "ghost")]);
        assert!(analyze(&s, Some("ghost")).selected.is_none());
    }

    #[test]
    fn test_type_distribution_and_views() {
        let mut s = schema(&["a", "b"], &[]);
        s.tables[1].kind = TableKind::View;
        let stats = analyze(&s, None);

        assert_eq!(stats.view_count, 1);
        assert_eq!(stats.type_distribution.len(), 2);
        assert_eq!(stats.max_type_count, 2);
    }

    #[test]
    fn test_metadata_rollups() {
        let day = |d| Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap();
        let s = Schema::new(
            vec![
                table("a").with_meta(TableMeta {
                    created_at: Some(day(1)),
                    updated_at: Some(day(4)),
                    approx_row_count: Some(10),
                }),
                table("b").with_meta(TableMeta {
                    created_at: None,
                    updated_at: Some(day(9)),
                    approx_row_count: None,
                }),
                table("c"),
            ],
            vec![],
        );
        let stats = analyze(&s, None);

        assert_eq!(stats.earliest_created_ts, Some(day(1)));
        assert_eq!(stats.latest_updated_ts, Some(day(9)));
        assert_eq!(stats.total_approx_rows, 10);
        assert_eq!(stats.recently_updated[0].name, "b");
    }

    #[test]
    fn test_with_metrics() {
        let s = schema(&["a"], &[]);
        let mut metrics = MetricsSnapshot::new();
        metrics.insert_column(
            "a",
            "name",
            ColumnMetrics {
                null_pct: Some(75.0),
                distinct_pct: Some(10.0),
                ..Default::default()
            },
        );
        let stats = Analyzer::default().with_metrics(&metrics).analyze(&s, None);

        assert_eq!(stats.quality.measured_columns, 1);
        assert_eq!(stats.quality.unmeasured_columns, 1);
        assert_eq!(stats.quality.high_null_columns, vec![ColumnRef::new("a", "name")]);
    }

    #[test]
    fn test_idempotent() {
        let s = schema(&["a", "b", "c"], &[("a", "b"), ("b", "a"), ("c", "c")]);
        let first = serde_json::to_string(&analyze(&s, Some("a"))).unwrap();
        let second = serde_json::to_string(&analyze(&s, Some("a"))).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.0 / 6.0, 3), 0.333);
        assert_eq!(round_to(1.0 / 6.0, 3), 0.167);
        assert_eq!(round_to(0.0, 3), 0.0);
    }
}
