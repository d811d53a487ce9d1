//! Output shapes of the graph builder.

use serde::Serialize;

use crate::schema::Table;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A table placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Table name.
    pub id: String,
    pub position: Position,
    /// Estimated card size; placement never depends on it.
    pub size: Size,
    pub data: Table,
}

/// One foreign key drawn between two tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// Stable across re-layouts of the same schema.
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub source_column: String,
    pub target_column: String,
    pub self_reference: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
}

/// The complete layout result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}
