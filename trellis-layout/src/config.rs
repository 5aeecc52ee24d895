//! Scene descriptions loaded from JSON.
//!
//! ```json
//! {
//!   "root": {
//!     "size": [800, 600],
//!     "children": [
//!       {
//!         "layout": { "kind": "stack", "orientation": "horizontal" },
//!         "children": [ { "size": [50, 20] }, { "size": [30, 40] } ]
//!       }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use trellis_scene::{GridPlacement, Margin, NodeId, SceneTree, Size};

use crate::engine::LayoutEngine;
use crate::error::{ConfigError, DimensionError};
use crate::grid::GridLayout;
use crate::shared::SharedLayouts;
use crate::stack::Orientation;
use crate::strategy::LayoutStrategy;

/// Which strategy lays out a node's children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategySpec {
    Canvas,
    Stack {
        #[serde(default)]
        orientation: Orientation,
    },
    Grid {
        #[serde(default)]
        rows: Vec<String>,
        #[serde(default)]
        columns: Vec<String>,
    },
}

impl StrategySpec {
    /// Canvas and stacks resolve to the shared instances; every grid gets
    /// its own, locked once built.
    pub fn build(&self, shared: &SharedLayouts) -> Result<Rc<dyn LayoutStrategy>, DimensionError> {
        let strategy: Rc<dyn LayoutStrategy> = match self {
            StrategySpec::Canvas => shared.canvas().clone(),
            StrategySpec::Stack { orientation } => shared.stack(*orientation).clone(),
            StrategySpec::Grid { rows, columns } => {
                let grid = GridLayout::new(rows, columns)?;
                grid.lock();
                Rc::new(grid)
            }
        };
        Ok(strategy)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSpec {
    pub size: Size,
    pub margin: Margin,
    pub padding: Margin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<StrategySpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridPlacement>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    pub root: NodeSpec,
}

/// A built scene: the tree, an engine with strategies attached, and the root.
pub struct Scene {
    pub tree: SceneTree,
    pub engine: LayoutEngine,
    pub root: NodeId,
}

impl SceneSpec {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn build(&self, shared: &SharedLayouts) -> Result<Scene, ConfigError> {
        let mut tree = SceneTree::new();
        let mut engine = LayoutEngine::new(shared);
        let root = tree.create_root(self.root.size);
        apply(&self.root, root, &mut tree, &mut engine, shared)?;
        Ok(Scene { tree, engine, root })
    }
}

fn apply(
    spec: &NodeSpec,
    id: NodeId,
    tree: &mut SceneTree,
    engine: &mut LayoutEngine,
    shared: &SharedLayouts,
) -> Result<(), ConfigError> {
    tree.set_margin(id, spec.margin)?;
    tree.set_padding(id, spec.padding)?;
    for (key, value) in &spec.data {
        tree.set_data(id, key.as_str(), value.clone())?;
    }
    if let Some(placement) = spec.grid {
        tree.set_grid_placement(id, placement)?;
    }
    if let Some(layout) = &spec.layout {
        engine.attach(id, layout.build(shared)?);
    }
    for child_spec in &spec.children {
        let child = tree.add_child(id, child_spec.size)?;
        apply(child_spec, child, tree, engine, shared)?;
    }
    Ok(())
}
