//! Reference tree walker - drives strategies over a scene tree.
//!
//! Strategies are attached per node; nodes without one fall back to the
//! shared canvas. A pass walks each root top-down so a parent has always
//! assigned its children's layout areas before their own strategies run.

use std::collections::HashMap;
use std::rc::Rc;

use trellis_scene::{NodeId, PropertyMask, SceneTree};

use crate::error::LayoutError;
use crate::shared::SharedLayouts;
use crate::strategy::LayoutStrategy;

/// A node whose layout pass failed. Its dirty flag is still set.
#[derive(Debug)]
pub struct LayoutFailure {
    pub node: NodeId,
    pub error: LayoutError,
}

/// Outcome of one [`LayoutEngine::run`].
#[derive(Debug, Default)]
pub struct LayoutReport {
    /// Nodes whose children were laid out, in visit order.
    pub updated: Vec<NodeId>,
    pub failures: Vec<LayoutFailure>,
}

impl LayoutReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct LayoutEngine {
    fallback: Rc<dyn LayoutStrategy>,
    attached: HashMap<NodeId, Rc<dyn LayoutStrategy>>,
}

impl LayoutEngine {
    pub fn new(shared: &SharedLayouts) -> Self {
        Self {
            fallback: shared.canvas().clone(),
            attached: HashMap::new(),
        }
    }

    /// Attach a strategy to `node`, replacing any previous one.
    pub fn attach(&mut self, node: NodeId, strategy: Rc<dyn LayoutStrategy>) {
        self.attached.insert(node, strategy);
    }

    pub fn detach(&mut self, node: NodeId) -> Option<Rc<dyn LayoutStrategy>> {
        self.attached.remove(&node)
    }

    /// The strategy that lays out `node`'s children.
    pub fn strategy(&self, node: NodeId) -> &Rc<dyn LayoutStrategy> {
        self.attached.get(&node).unwrap_or(&self.fallback)
    }

    /// Record that properties of `node` changed.
    ///
    /// The parent is dirtied when its strategy's mask covers any of the
    /// changed bits. A change to `node`'s own children dirties `node`.
    /// Returns whether anything was marked.
    pub fn notify_changed(
        &self,
        tree: &mut SceneTree,
        node: NodeId,
        changed: PropertyMask,
    ) -> Result<bool, LayoutError> {
        let mut marked = false;
        if changed.contains(PropertyMask::CHILDREN) {
            tree.mark_layout_dirty(node)?;
            marked = true;
        }
        if let Some(parent) = tree.parent(node)? {
            if self.strategy(parent).dirty_mask().intersects(changed) {
                tree.mark_layout_dirty(parent)?;
                marked = true;
            }
        }
        Ok(marked)
    }

    /// Lay out a single node with its strategy.
    pub fn update_node(&self, tree: &mut SceneTree, node: NodeId) -> Result<(), LayoutError> {
        self.strategy(node).update_layout(tree, node)
    }

    /// Lay out every dirty node, top-down from each root.
    ///
    /// A failing node is recorded and skipped; the rest of the tree is
    /// still laid out.
    pub fn run(&self, tree: &mut SceneTree) -> LayoutReport {
        let mut report = LayoutReport::default();
        let roots: Vec<NodeId> = tree.roots().collect();

        for root in roots {
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                let Ok(dirty) = tree.is_layout_dirty(node) else {
                    continue;
                };
                if dirty {
                    let strategy = self.strategy(node);
                    match strategy.update_layout(tree, node) {
                        Ok(()) => report.updated.push(node),
                        Err(error) => {
                            tracing::warn!(%node, strategy = strategy.name(), %error, "layout failed");
                            report.failures.push(LayoutFailure { node, error });
                        }
                    }
                }
                if let Ok(children) = tree.children(node) {
                    stack.extend(children.iter().rev());
                }
            }
        }

        tracing::debug!(
            updated = report.updated.len(),
            failed = report.failures.len(),
            "layout pass complete"
        );
        report
    }
}
