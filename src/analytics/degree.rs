//! In/out degree counting and hub ranking.

use std::collections::HashMap;

use crate::schema::Schema;

use super::stats::{Hub, TableDegree, TableRole};

/// Per-name foreign-key counts from a single pass over the keys.
///
/// Names of absent tables may appear here; [`table_degrees`] only reports
/// tables that exist in the schema.
#[derive(Debug, Default)]
pub struct DegreeCounts<'a> {
    pub in_degree: HashMap<&'a str, usize>,
    pub out_degree: HashMap<&'a str, usize>,
}

pub fn count_degrees(schema: &Schema) -> DegreeCounts<'_> {
    let mut counts = DegreeCounts::default();
    for fk in &schema.foreign_keys {
        *counts.out_degree.entry(fk.from.table.as_str()).or_insert(0) += 1;
        *counts.in_degree.entry(fk.to.table.as_str()).or_insert(0) += 1;
    }
    counts
}

impl DegreeCounts<'_> {
    pub fn in_of(&self, table: &str) -> usize {
        self.in_degree.get(table).copied().unwrap_or(0)
    }

    pub fn out_of(&self, table: &str) -> usize {
        self.out_degree.get(table).copied().unwrap_or(0)
    }
}

/// One row per schema table, in schema order.
pub fn table_degrees(schema: &Schema, counts: &DegreeCounts<'_>) -> Vec<TableDegree> {
    schema
        .tables
        .iter()
        .map(|t| {
            let in_degree = counts.in_of(&t.name);
            let out_degree = counts.out_of(&t.name);
            TableDegree {
                name: t.name.clone(),
                in_degree,
                out_degree,
                degree: in_degree + out_degree,
                role: TableRole::classify(in_degree, out_degree),
            }
        })
        .collect()
}

/// Every table, by total degree descending. Ties keep schema order, so a
/// schema without foreign keys ranks its tables in declaration order.
pub fn rank_hubs(rows: &[TableDegree]) -> Vec<Hub> {
    let mut ranked: Vec<&TableDegree> = rows.iter().collect();
    ranked.sort_by(|a, b| b.degree.cmp(&a.degree));
    ranked
        .into_iter()
        .map(|r| Hub {
            name: r.name.clone(),
            degree: r.degree,
        })
        .collect()
}

pub fn names_with_role(rows: &[TableDegree], role: TableRole) -> Vec<String> {
    rows.iter()
        .filter(|r| r.role == role)
        .map(|r| r.name.clone())
        .collect()
}
