//! Per-node external data attached by callers and read by strategies.

use serde::{Deserialize, Serialize};

/// Key under which grid placement is stored on a child node.
pub const GRID_KEY: &str = "grid";

/// Where a child sits inside a grid panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPlacement {
    pub row: usize,
    pub column: usize,
    #[serde(default = "default_span")]
    pub row_span: usize,
    #[serde(default = "default_span")]
    pub column_span: usize,
}

fn default_span() -> usize {
    1
}

impl GridPlacement {
    /// Place in a single cell.
    pub fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            row_span: 1,
            column_span: 1,
        }
    }

    /// Span several rows and columns. Spans below 1 are raised to 1.
    pub fn with_span(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span.max(1);
        self.column_span = column_span.max(1);
        self
    }

    /// Last row covered (inclusive). Saturates on oversized spans.
    pub fn last_row(&self) -> usize {
        self.row.saturating_add(self.row_span.max(1) - 1)
    }

    /// Last column covered (inclusive). Saturates on oversized spans.
    pub fn last_column(&self) -> usize {
        self.column.saturating_add(self.column_span.max(1) - 1)
    }

    /// Whether every covered cell lies inside a `rows x columns` grid.
    pub fn fits(&self, rows: usize, columns: usize) -> bool {
        self.row < rows
            && self.column < columns
            && self.row_span.max(1) <= rows - self.row
            && self.column_span.max(1) <= columns - self.column
    }
}

/// A value stored in a node's external data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeData {
    /// Grid placement, read by grid layout.
    Grid(GridPlacement),
    /// Anything else a caller wants to attach.
    Value(serde_json::Value),
}

impl NodeData {
    pub fn as_grid(&self) -> Option<GridPlacement> {
        match self {
            NodeData::Grid(placement) => Some(*placement),
            NodeData::Value(_) => None,
        }
    }
}

impl From<GridPlacement> for NodeData {
    fn from(placement: GridPlacement) -> Self {
        NodeData::Grid(placement)
    }
}

impl From<serde_json::Value> for NodeData {
    fn from(value: serde_json::Value) -> Self {
        NodeData::Value(value)
    }
}
