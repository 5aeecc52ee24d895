//! Trellis Scene - the retained node tree the layout engine works on.
//!
//! Holds per-node size, layout slots, margins, dirty flags and a keyed
//! external data table. Rendering and transforms live elsewhere.

mod data;
mod geometry;
mod margin;
mod property;
mod tree;

pub use data::{GRID_KEY, GridPlacement, NodeData};
pub use geometry::{Point, Rect, Size};
pub use margin::Margin;
pub use property::PropertyMask;
pub use tree::{NodeId, NodeRole, SceneError, SceneNode, SceneTree};
