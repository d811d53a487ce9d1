//! Aggregation of externally supplied data-quality metrics.

use crate::metrics::ColumnMetricsProvider;
use crate::schema::{ColumnRef, Schema};

use super::round_to;
use super::stats::QualitySummary;

pub fn summarize_quality(
    schema: &Schema,
    provider: Option<&dyn ColumnMetricsProvider>,
    high_null_threshold: f64,
) -> QualitySummary {
    let Some(provider) = provider else {
        return QualitySummary {
            unmeasured_columns: schema.column_count(),
            ..QualitySummary::default()
        };
    };

    let mut summary = QualitySummary::default();
    let mut null_pcts: Vec<f64> = Vec::new();
    let mut distinct_pcts: Vec<f64> = Vec::new();
    let mut duplicate_rates: Vec<f64> = Vec::new();

    for table in &schema.tables {
        for column in &table.columns {
            match provider.column_metrics(&table.name, &column.name) {
                Some(m) => {
                    summary.measured_columns += 1;
                    if let Some(pct) = m.null_pct {
                        null_pcts.push(pct);
                        if pct >= high_null_threshold {
                            summary
                                .high_null_columns
                                .push(ColumnRef::new(&table.name, &column.name));
                        }
                    }
                    distinct_pcts.extend(m.distinct_pct);
                }
                None => summary.unmeasured_columns += 1,
            }
        }

        if let Some(tm) = provider.table_metrics(&table.name) {
            if tm.orphan_rate.is_some_and(|r| r > 0.0) {
                summary.tables_with_orphan_rows.push(table.name.clone());
            }
            if let Some(rate) = tm.duplicate_rate {
                duplicate_rates.push(rate);
            }
        }
    }

    summary.avg_null_pct = mean(&null_pcts);
    summary.avg_distinct_pct = mean(&distinct_pcts);
    summary.avg_duplicate_rate = mean(&duplicate_rates);
    summary
}

/// Mean of the values actually reported; `None` when there are none.
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    Some(round_to(avg, 3))
}
