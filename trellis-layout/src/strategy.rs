//! The contract every layout strategy implements.

use std::cell::Cell;

use trellis_scene::{NodeId, PropertyMask, SceneTree};

use crate::error::LayoutError;

/// One-way lock guarding a strategy's configuration.
///
/// Shared strategy instances are locked once so no call site can
/// reconfigure them for every other node that uses them.
#[derive(Debug, Default)]
pub struct LockState(Cell<bool>);

impl LockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock. Returns `true` only for the call that performed the transition.
    pub fn lock(&self) -> bool {
        !self.0.replace(true)
    }

    pub fn is_locked(&self) -> bool {
        self.0.get()
    }
}

/// A layout algorithm attached to a node, sizing and placing its children.
pub trait LayoutStrategy {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether children may position themselves independently.
    fn allows_child_positioning(&self) -> bool;

    /// Child property changes that should dirty the node using this strategy.
    fn dirty_mask(&self) -> PropertyMask;

    fn lock_state(&self) -> &LockState;

    /// Recompute `layout_area` and `layout_area_pos` of each direct child of
    /// `node`. Does not touch the dirty flag.
    fn arrange(&self, tree: &mut SceneTree, node: NodeId) -> Result<(), LayoutError>;

    /// Lay out `node`'s children if it is dirty, then clear the flag.
    ///
    /// A clean node is left alone. On error the flag stays set so the
    /// caller can retry or report.
    fn update_layout(&self, tree: &mut SceneTree, node: NodeId) -> Result<(), LayoutError> {
        if !tree.is_layout_dirty(node)? {
            return Ok(());
        }
        self.arrange(tree, node)?;
        tree.clear_layout_dirty(node)?;
        Ok(())
    }

    fn lock(&self) -> bool {
        self.lock_state().lock()
    }

    fn is_locked(&self) -> bool {
        self.lock_state().is_locked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_scene::Size;

    struct Counting {
        lock: LockState,
        calls: Cell<usize>,
        fail: bool,
    }

    impl Counting {
        fn new(fail: bool) -> Self {
            Self {
                lock: LockState::new(),
                calls: Cell::new(0),
                fail,
            }
        }
    }

    impl LayoutStrategy for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn allows_child_positioning(&self) -> bool {
            false
        }

        fn dirty_mask(&self) -> PropertyMask {
            PropertyMask::empty()
        }

        fn lock_state(&self) -> &LockState {
            &self.lock
        }

        fn arrange(&self, _tree: &mut SceneTree, node: NodeId) -> Result<(), LayoutError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(LayoutError::MissingPlacement { node });
            }
            Ok(())
        }
    }

    #[test]
    fn test_lock_transitions_once() {
        let lock = LockState::new();
        assert!(!lock.is_locked());
        assert!(lock.lock());
        assert!(!lock.lock());
        assert!(lock.is_locked());
    }

    #[test]
    fn test_update_clears_flag_and_is_idempotent() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(Size::ZERO);
        let strategy = Counting::new(false);

        strategy.update_layout(&mut tree, root).unwrap();
        assert!(!tree.is_layout_dirty(root).unwrap());

        strategy.update_layout(&mut tree, root).unwrap();
        assert_eq!(strategy.calls.get(), 1);
        assert!(!tree.is_layout_dirty(root).unwrap());
    }

    #[test]
    fn test_failure_leaves_flag_set() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(Size::ZERO);
        let strategy = Counting::new(true);

        assert!(strategy.update_layout(&mut tree, root).is_err());
        assert!(tree.is_layout_dirty(root).unwrap());
    }
}
