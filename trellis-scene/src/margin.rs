//! Spacing around and inside a node.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Spacing on each side of a box.
///
/// Used both as a node's outer margin and as its inner padding (the insets
/// subtracted from its layout area to produce the content area).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Create a margin with explicit values for each side.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Uniform margin on all sides.
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Symmetric margin (horizontal, vertical).
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal spacing.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical spacing.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Area a node occupies in its parent, margins included.
    ///
    /// On each axis the intrinsic extent plus the margins is used. An axis
    /// with no intrinsic extent (zero or negative) takes the outer extent
    /// as-is, so unmeasured nodes fill what they were given.
    pub fn adjust(&self, intrinsic: Size, outer: Size) -> Size {
        let width = if intrinsic.width > 0.0 {
            intrinsic.width + self.horizontal()
        } else {
            outer.width
        };
        let height = if intrinsic.height > 0.0 {
            intrinsic.height + self.vertical()
        } else {
            outer.height
        };
        Size::new(width, height)
    }

    /// Shrink a size by this spacing, never below zero.
    pub fn deflate(&self, size: Size) -> Size {
        Size::new(
            (size.width - self.horizontal()).max(0.0),
            (size.height - self.vertical()).max(0.0),
        )
    }
}
