//! Grid layout engine.

use tracing::debug;

use crate::config::LayoutConfig;
use crate::measure::TextMetrics;
use crate::schema::Schema;

use super::edges::build_edges;
use super::placement::{cell_position, grid_cell, grid_columns};
use super::types::{GraphNode, SchemaGraph, Size};

/// Places tables on a roughly square grid in schema order.
///
/// This is a placement heuristic only: cards may overlap when a table is larger
/// than the spacing, and edges carry no routing.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub(crate) metrics: TextMetrics,
    pub(crate) origin_x: f64,
    pub(crate) origin_y: f64,
    pub(crate) spacing_x: f64,
    pub(crate) spacing_y: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for GridLayout {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            metrics: TextMetrics::default(),
            origin_x: config.origin_x,
            origin_y: config.origin_y,
            spacing_x: config.spacing_x,
            spacing_y: config.spacing_y,
        }
    }
}

impl GridLayout {
    /// Compute node positions and edges for the given schema.
    pub fn layout(&self, schema: &Schema) -> SchemaGraph {
        let columns = grid_columns(schema.tables.len());

        let nodes: Vec<GraphNode> = schema
            .tables
            .iter()
            .enumerate()
            .map(|(idx, table)| {
                let position = cell_position(
                    grid_cell(idx, columns),
                    (self.origin_x, self.origin_y),
                    (self.spacing_x, self.spacing_y),
                );
                let (width, height) = self.metrics.table_size(table);
                GraphNode {
                    id: table.name.clone(),
                    position,
                    size: Size { width, height },
                    data: table.clone(),
                }
            })
            .collect();

        let edges = build_edges(&schema.foreign_keys);

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            grid_columns = columns,
            "laid out schema graph"
        );

        SchemaGraph { nodes, edges }
    }
}
