//! Retained scene tree - an arena of layout nodes.
//!
//! The tree owns node lifetime and relations. Layout strategies only read
//! sizes and relations and write the layout slots of child nodes.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{GRID_KEY, GridPlacement, NodeData};
use crate::geometry::{Point, Rect, Size};
use crate::margin::Margin;

/// Handle to a node in a [`SceneTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
}

/// Structural position of a node, used where sizing rules differ by depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Root,
    ChildOfRoot,
    Descendant,
}

/// A single node in the scene tree.
#[derive(Debug, Clone)]
pub struct SceneNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    actual_size: Size,
    layout_area: Size,
    layout_area_pos: Point,
    content_area: Size,
    margin: Margin,
    padding: Margin,
    layout_dirty: bool,
    data: HashMap<String, NodeData>,
}

impl SceneNode {
    fn new(parent: Option<NodeId>, actual_size: Size) -> Self {
        Self {
            parent,
            children: Vec::new(),
            actual_size,
            layout_area: Size::ZERO,
            layout_area_pos: Point::ORIGIN,
            content_area: Size::ZERO,
            margin: Margin::ZERO,
            padding: Margin::ZERO,
            layout_dirty: true,
            data: HashMap::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Rendered/measured size, set outside the layout engine.
    pub fn actual_size(&self) -> Size {
        self.actual_size
    }

    /// Size allotted by the parent's layout pass.
    pub fn layout_area(&self) -> Size {
        self.layout_area
    }

    /// Position within the parent's layout area.
    pub fn layout_area_pos(&self) -> Point {
        self.layout_area_pos
    }

    /// Layout area and position together.
    pub fn layout_rect(&self) -> Rect {
        Rect::from_origin_size(self.layout_area_pos, self.layout_area)
    }

    /// Space left for this node's own children after padding.
    pub fn content_area(&self) -> Size {
        self.content_area
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn padding(&self) -> Margin {
        self.padding
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    pub fn data(&self, key: &str) -> Option<&NodeData> {
        self.data.get(key)
    }

    /// Grid placement stored under [`GRID_KEY`], if any.
    pub fn grid_placement(&self) -> Option<GridPlacement> {
        self.data.get(GRID_KEY).and_then(NodeData::as_grid)
    }
}

/// Arena-backed tree of layout nodes.
///
/// Nodes are never freed; a `NodeId` handed out stays valid for the life of
/// the tree.
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    nodes: Vec<SceneNode>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a parentless node. New nodes start dirty.
    pub fn create_root(&mut self, actual_size: Size) -> NodeId {
        self.push(SceneNode::new(None, actual_size))
    }

    /// Append a child at the end of `parent`'s children and dirty the parent.
    pub fn add_child(&mut self, parent: NodeId, actual_size: Size) -> Result<NodeId, SceneError> {
        self.node(parent)?;
        let id = self.push(SceneNode::new(Some(parent), actual_size));
        let parent_node = self.node_mut(parent)?;
        parent_node.children.push(id);
        parent_node.layout_dirty = true;
        Ok(id)
    }

    fn push(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> Result<&SceneNode, SceneError> {
        self.nodes.get(id.index()).ok_or(SceneError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, SceneError> {
        self.nodes.get_mut(id.index()).ok_or(SceneError::UnknownNode(id))
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], SceneError> {
        Ok(&self.node(id)?.children)
    }

    /// All parentless nodes, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| NodeId(index as u32))
    }

    /// Classify a node by its depth.
    pub fn role(&self, id: NodeId) -> Result<NodeRole, SceneError> {
        let role = match self.node(id)?.parent {
            None => NodeRole::Root,
            Some(parent) if self.node(parent)?.parent.is_none() => NodeRole::ChildOfRoot,
            Some(_) => NodeRole::Descendant,
        };
        Ok(role)
    }

    /// Nodes of the subtree rooted at `id`, parents before children, siblings
    /// in child order.
    pub fn preorder(&self, id: NodeId) -> Result<Vec<NodeId>, SceneError> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.node(next)?.children.iter().rev());
        }
        Ok(order)
    }

    pub fn set_actual_size(&mut self, id: NodeId, size: Size) -> Result<(), SceneError> {
        self.node_mut(id)?.actual_size = size;
        Ok(())
    }

    pub fn set_margin(&mut self, id: NodeId, margin: Margin) -> Result<(), SceneError> {
        self.node_mut(id)?.margin = margin;
        Ok(())
    }

    /// Change the padding; the content area is re-derived from it.
    pub fn set_padding(&mut self, id: NodeId, padding: Margin) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        node.padding = padding;
        let content = padding.deflate(node.layout_area);
        if content != node.content_area {
            node.content_area = content;
            node.layout_dirty = true;
        }
        Ok(())
    }

    /// Write the layout area of `id`.
    ///
    /// The content area follows. When the area actually changes the node is
    /// marked dirty so its own children get laid out again.
    pub fn set_layout_area(&mut self, id: NodeId, area: Size) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        if node.layout_area != area {
            node.layout_area = area;
            node.content_area = node.padding.deflate(area);
            node.layout_dirty = true;
        }
        Ok(())
    }

    pub fn set_layout_area_pos(&mut self, id: NodeId, pos: Point) -> Result<(), SceneError> {
        self.node_mut(id)?.layout_area_pos = pos;
        Ok(())
    }

    pub fn mark_layout_dirty(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.node_mut(id)?.layout_dirty = true;
        Ok(())
    }

    /// Clear the dirty flag. Only a layout strategy should call this, after
    /// it has recomputed the node's children.
    pub fn clear_layout_dirty(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.node_mut(id)?.layout_dirty = false;
        Ok(())
    }

    pub fn is_layout_dirty(&self, id: NodeId) -> Result<bool, SceneError> {
        Ok(self.node(id)?.layout_dirty)
    }

    /// Attach external data under `key`, replacing any previous value.
    pub fn set_data(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        data: impl Into<NodeData>,
    ) -> Result<(), SceneError> {
        self.node_mut(id)?.data.insert(key.into(), data.into());
        Ok(())
    }

    /// Shorthand for storing a [`GridPlacement`] under [`GRID_KEY`].
    pub fn set_grid_placement(
        &mut self,
        id: NodeId,
        placement: GridPlacement,
    ) -> Result<(), SceneError> {
        self.set_data(id, GRID_KEY, placement)
    }
}
