//! Canvas layout - hands available area down without moving children.
//!
//! Children carry their own coordinates. The canvas only decides how much
//! room each child has: the whole canvas for children of the root, the
//! parent's content area below that.

use trellis_scene::{NodeId, NodeRole, PropertyMask, SceneTree};

use crate::error::LayoutError;
use crate::strategy::{LayoutStrategy, LockState};

#[derive(Debug, Default)]
pub struct CanvasLayout {
    lock: LockState,
}

impl CanvasLayout {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStrategy for CanvasLayout {
    fn name(&self) -> &'static str {
        "canvas"
    }

    fn allows_child_positioning(&self) -> bool {
        true
    }

    fn dirty_mask(&self) -> PropertyMask {
        PropertyMask::empty()
    }

    fn lock_state(&self) -> &LockState {
        &self.lock
    }

    fn arrange(&self, tree: &mut SceneTree, node: NodeId) -> Result<(), LayoutError> {
        let this = tree.node(node)?;
        let actual_size = this.actual_size();
        let children = this.children().to_vec();

        if tree.role(node)? == NodeRole::Root {
            tree.set_layout_area(node, actual_size)?;
        }

        for child in children {
            let area = match tree.role(child)? {
                NodeRole::ChildOfRoot => actual_size,
                // `node` is the child's parent; read after the root case
                // above may have refreshed it.
                _ => tree.node(node)?.content_area(),
            };
            tree.set_layout_area(child, area)?;
        }

        tracing::debug!(%node, width = actual_size.width, height = actual_size.height, "canvas pass");
        Ok(())
    }
}
