//! Layout error types.

use thiserror::Error;
use trellis_scene::{NodeId, SceneError};

/// A row/column size string that could not be parsed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DimensionError {
    #[error("invalid length: {0:?}")]
    InvalidLength(String),

    #[error("invalid star weight: {0:?}")]
    InvalidWeight(String),

    #[error("dimension out of range: {0:?}")]
    OutOfRange(String),
}

/// Failure while laying out one node's children.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("grid child {node} has no placement")]
    MissingPlacement { node: NodeId },

    #[error(
        "grid child {node} placed at row {row}, column {column} outside a {rows}x{columns} grid"
    )]
    PlacementOutOfBounds {
        node: NodeId,
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("grid child {node} overlaps {occupant} at row {row}, column {column}")]
    CellCollision {
        node: NodeId,
        occupant: NodeId,
        row: usize,
        column: usize,
    },

    #[error("grid cell table was built for {owner}, cannot lay out {node}")]
    SharedCellTable { owner: NodeId, node: NodeId },

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Failure while loading a scene description.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dimension error: {0}")]
    Dimension(#[from] DimensionError),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}
