use indexmap::IndexMap;

use crate::schema::Schema;

use super::stats::TypeCount;

const UNKNOWN_TYPE: &str = "UNKNOWN";

/// Column types upper-cased so `text` and `TEXT` share a bucket. Sorted by
/// count descending, ties in order of first appearance.
pub fn type_distribution(schema: &Schema) -> Vec<TypeCount> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for column in schema.tables.iter().flat_map(|t| &t.columns) {
        let label = column.typ.trim();
        let key = if label.is_empty() {
            UNKNOWN_TYPE.to_string()
        } else {
            label.to_uppercase()
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut histogram: Vec<TypeCount> = counts
        .into_iter()
        .map(|(type_name, count)| TypeCount { type_name, count })
        .collect();
    histogram.sort_by(|a, b| b.count.cmp(&a.count));
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, Table};

    #[test]
    fn test_case_normalized_histogram() {
        let schema = Schema::new(
            vec![
                Table::new("a")
                    .with_column(Column::pk("id", "integer"))
                    .with_column(Column::new("name", "text")),
                Table::new("b")
                    .with_column(Column::pk("id", "INTEGER"))
                    .with_column(Column::new("body", "TEXT"))
                    .with_column(Column::new("blob", ""))
                    .with_column(Column::new("note", "Text")),
            ],
            vec![],
        );
        let histogram = type_distribution(&schema);
        assert_eq!(
            histogram,
            vec![
                TypeCount { type_name: "TEXT".into(), count: 3 },
                TypeCount { type_name: "INTEGER".into(), count: 2 },
                TypeCount { type_name: "UNKNOWN".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_empty_schema() {
        assert!(type_distribution(&Schema::default()).is_empty());
    }
}
