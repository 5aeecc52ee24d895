//! Trellis Layout - pluggable layout strategies for a retained node tree.
//!
//! A strategy is attached to a node and sizes/places that node's direct
//! children whenever the node is marked dirty:
//!
//! - [`CanvasLayout`]: passes available area down, children position
//!   themselves.
//! - [`StackLayout`]: children in a row or column, sharing the largest
//!   cross-axis extent.
//! - [`GridLayout`]: children in cells of pixel, star and auto tracks.
//!
//! # Architecture
//!
//! ```text
//! tree marks node dirty -> LayoutEngine::run (top-down) -> strategy.update_layout
//!     -> children's layout_area / layout_area_pos written -> dirty flag cleared
//! ```

pub mod canvas;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod shared;
pub mod stack;
pub mod strategy;

pub use canvas::CanvasLayout;
pub use config::{NodeSpec, Scene, SceneSpec, StrategySpec};
pub use engine::{LayoutEngine, LayoutFailure, LayoutReport};
pub use error::{ConfigError, DimensionError, LayoutError};
pub use grid::{CellInfo, CellTable, DimensionDefinition, GridItem, GridLayout, ResolvedTracks, UnitKind};
pub use shared::SharedLayouts;
pub use stack::{Orientation, StackLayout};
pub use strategy::{LayoutStrategy, LockState};
