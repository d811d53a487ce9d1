//! Table metadata rollups. Tables without usable timestamps are skipped.

use chrono::{DateTime, Utc};

use crate::schema::Schema;

use super::stats::RecentTable;

#[derive(Debug, Default, PartialEq)]
pub struct MetaRollup {
    pub earliest_created: Option<DateTime<Utc>>,
    pub latest_updated: Option<DateTime<Utc>>,
    pub total_approx_rows: u64,
    pub recently_updated: Vec<RecentTable>,
}

pub fn rollup_meta(schema: &Schema, recent_limit: usize) -> MetaRollup {
    let mut rollup = MetaRollup::default();
    let mut recent: Vec<RecentTable> = Vec::new();

    for table in &schema.tables {
        let Some(meta) = &table.meta else {
            continue;
        };
        if let Some(created) = meta.created_at {
            rollup.earliest_created = Some(match rollup.earliest_created {
                Some(current) => current.min(created),
                None => created,
            });
        }
        if let Some(updated) = meta.updated_at {
            rollup.latest_updated = Some(match rollup.latest_updated {
                Some(current) => current.max(updated),
                None => updated,
            });
            recent.push(RecentTable {
                name: table.name.clone(),
                updated_at: updated,
            });
        }
        rollup.total_approx_rows = rollup
            .total_approx_rows
            .saturating_add(meta.approx_row_count.unwrap_or(0));
    }

    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    recent.truncate(recent_limit);
    rollup.recently_updated = recent;
    rollup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Table, TableMeta};
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn meta(created: Option<u32>, updated: Option<u32>, rows: Option<u64>) -> TableMeta {
        TableMeta {
            created_at: created.map(ts),
            updated_at: updated.map(ts),
            approx_row_count: rows,
        }
    }

    #[test]
    fn test_rollup() {
        let schema = Schema::new(
            vec![
                Table::new("a").with_meta(meta(Some(5), Some(10), Some(100))),
                Table::new("b").with_meta(meta(Some(2), Some(20), None)),
                Table::new("c"),
                Table::new("d").with_meta(meta(None, Some(10), Some(7))),
                Table::new("e").with_meta(meta(Some(9), None, Some(3))),
            ],
            vec![],
        );
        let rollup = rollup_meta(&schema, 2);

        assert_eq!(rollup.earliest_created, Some(ts(2)));
        assert_eq!(rollup.latest_updated, Some(ts(20)));
        assert_eq!(rollup.total_approx_rows, 110);
        let names: Vec<&str> = rollup
            .recently_updated
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_ties_keep_schema_order() {
        let schema = Schema::new(
            vec![
                Table::new("first").with_meta(meta(None, Some(3), None)),
                Table::new("second").with_meta(meta(None, Some(3), None)),
            ],
            vec![],
        );
        let rollup = rollup_meta(&schema, 5);
        assert_eq!(rollup.recently_updated[0].name, "first");
        assert_eq!(rollup.recently_updated[1].name, "second");
    }

    #[test]
    fn test_no_meta_degrades_to_empty() {
        let schema = Schema::new(vec![Table::new("a"), Table::new("b")], vec![]);
        assert_eq!(rollup_meta(&schema, 5), MetaRollup::default());
    }
}
