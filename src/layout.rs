//! Schema to diagram transformation: grid-placed nodes and one edge per
//! foreign key.

mod edges;
mod engine;
mod placement;
mod types;

pub use edges::{edge_id, edge_label};
pub use engine::GridLayout;
pub use placement::grid_columns;
pub use types::{GraphEdge, GraphNode, Position, SchemaGraph, Size};

use crate::schema::Schema;

/// Lay out `schema` with the default grid spacing.
pub fn layout(schema: &Schema) -> SchemaGraph {
    GridLayout::default().layout(schema)
}
