//! Process-wide shared strategies.

use std::rc::Rc;

use crate::canvas::CanvasLayout;
use crate::stack::{Orientation, StackLayout};
use crate::strategy::LayoutStrategy;

/// The stateless strategies every scene can share.
///
/// Build once at startup and pass by reference. Each instance is locked on
/// construction, so nothing can reconfigure it for the other nodes using it.
#[derive(Debug, Clone)]
pub struct SharedLayouts {
    canvas: Rc<CanvasLayout>,
    horizontal: Rc<StackLayout>,
    vertical: Rc<StackLayout>,
}

impl SharedLayouts {
    pub fn new() -> Self {
        let canvas = CanvasLayout::new();
        let horizontal = StackLayout::horizontal();
        let vertical = StackLayout::vertical();
        canvas.lock();
        horizontal.lock();
        vertical.lock();

        Self {
            canvas: Rc::new(canvas),
            horizontal: Rc::new(horizontal),
            vertical: Rc::new(vertical),
        }
    }

    pub fn canvas(&self) -> &Rc<CanvasLayout> {
        &self.canvas
    }

    pub fn horizontal(&self) -> &Rc<StackLayout> {
        &self.horizontal
    }

    pub fn vertical(&self) -> &Rc<StackLayout> {
        &self.vertical
    }

    pub fn stack(&self, orientation: Orientation) -> &Rc<StackLayout> {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }
}

impl Default for SharedLayouts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_instance_every_access() {
        let shared = SharedLayouts::new();
        assert!(Rc::ptr_eq(shared.horizontal(), shared.horizontal()));
        assert!(Rc::ptr_eq(shared.vertical(), shared.stack(Orientation::Vertical)));
        assert!(!Rc::ptr_eq(shared.horizontal(), shared.vertical()));

        let copy = shared.clone();
        assert!(Rc::ptr_eq(shared.canvas(), copy.canvas()));
    }

    #[test]
    fn test_shared_instances_are_locked() {
        let shared = SharedLayouts::new();
        assert!(shared.canvas().is_locked());
        assert!(shared.horizontal().is_locked());
        assert!(shared.vertical().is_locked());
        assert!(!shared.horizontal().lock());
        assert_eq!(shared.horizontal().orientation(), Orientation::Horizontal);
        assert_eq!(shared.vertical().orientation(), Orientation::Vertical);
    }
}
