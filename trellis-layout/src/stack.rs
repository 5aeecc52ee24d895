//! Stack layout - children placed one after another along a single axis.
//!
//! Two passes over the children:
//!
//! 1. Measure each child's margin-adjusted area and track the largest
//!    cross-axis extent. A child without a cross extent of its own counts
//!    as 0 there, so the shared extent can shrink between passes.
//! 2. Place children in tree order with a running main-axis cursor, giving
//!    every child the shared cross extent.

use serde::{Deserialize, Serialize};
use trellis_scene::{NodeId, Point, PropertyMask, SceneTree, Size};

use crate::error::LayoutError;
use crate::strategy::{LayoutStrategy, LockState};

/// Direction children flow in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Extent along the flow direction.
    #[inline]
    pub fn main(self, size: Size) -> f32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Extent across the flow direction.
    #[inline]
    pub fn cross(self, size: Size) -> f32 {
        match self {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    #[inline]
    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }

    #[inline]
    pub fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Orientation::Horizontal => Point::new(main, cross),
            Orientation::Vertical => Point::new(cross, main),
        }
    }
}

#[derive(Debug)]
pub struct StackLayout {
    orientation: Orientation,
    lock: LockState,
}

impl StackLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            lock: LockState::new(),
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change the flow direction. Dropped if the layout is locked.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.lock.is_locked() {
            tracing::warn!(
                current = ?self.orientation,
                requested = ?orientation,
                "stack layout is locked, orientation change dropped"
            );
            return;
        }
        self.orientation = orientation;
    }
}

impl Default for StackLayout {
    fn default() -> Self {
        Self::horizontal()
    }
}

impl LayoutStrategy for StackLayout {
    fn name(&self) -> &'static str {
        match self.orientation {
            Orientation::Horizontal => "hstack",
            Orientation::Vertical => "vstack",
        }
    }

    fn allows_child_positioning(&self) -> bool {
        false
    }

    fn dirty_mask(&self) -> PropertyMask {
        PropertyMask::SIZE | PropertyMask::MARGIN
    }

    fn lock_state(&self) -> &LockState {
        &self.lock
    }

    fn arrange(&self, tree: &mut SceneTree, node: NodeId) -> Result<(), LayoutError> {
        let axis = self.orientation;
        let children = tree.children(node)?.to_vec();

        // Pass 1: measure
        let mut measured = Vec::with_capacity(children.len());
        let mut max_cross = 0.0f32;
        for &child in &children {
            let child_node = tree.node(child)?;
            // The cross extent of the old slot is this stack's own output.
            let outer = axis.size(axis.main(child_node.layout_area()), 0.0);
            let area = child_node.margin().adjust(child_node.actual_size(), outer);
            max_cross = max_cross.max(axis.cross(area));
            measured.push(area);
        }

        // Pass 2: place
        let mut cursor = 0.0f32;
        for (&child, area) in children.iter().zip(measured) {
            let main = axis.main(area);
            tree.set_layout_area_pos(child, axis.point(cursor, 0.0))?;
            tree.set_layout_area(child, axis.size(main, max_cross))?;
            cursor += main;
        }

        tracing::debug!(%node, children = children.len(), extent = cursor, max_cross, "stack pass");
        Ok(())
    }
}
