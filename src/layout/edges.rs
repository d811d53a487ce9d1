//! Edge construction, one edge per foreign key.

use crate::schema::ForeignKey;

use super::types::GraphEdge;

/// Id encoding the edge's position and both endpoints, so an unchanged foreign
/// key keeps its id across reloads.
pub fn edge_id(index: usize, fk: &ForeignKey) -> String {
    format!(
        "fk-{}:{}.{}->{}.{}",
        index, fk.from.table, fk.from.column, fk.to.table, fk.to.column
    )
}

pub fn edge_label(fk: &ForeignKey) -> String {
    format!("{} → {}", fk.from.column, fk.to.column)
}

/// Edges to tables missing from the schema are still emitted; the renderer
/// decides what to do with them.
pub fn build_edges(foreign_keys: &[ForeignKey]) -> Vec<GraphEdge> {
    foreign_keys
        .iter()
        .enumerate()
        .map(|(idx, fk)| GraphEdge {
            id: edge_id(idx, fk),
            source: fk.from.table.clone(),
            target: fk.to.table.clone(),
            label: edge_label(fk),
            source_column: fk.from.column.clone(),
            target_column: fk.to.column.clone(),
            self_reference: fk.is_self_reference(),
            on_update: fk.on_update.clone(),
            on_delete: fk.on_delete.clone(),
        })
        .collect()
}
