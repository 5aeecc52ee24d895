//! Node property change bits.

use bitflags::bitflags;

bitflags! {
    /// Which node properties changed.
    ///
    /// Strategies declare the subset that should dirty the node they are
    /// attached to when one of its children reports a change.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PropertyMask: u32 {
        const SIZE       = 1 << 0;
        const POSITION   = 1 << 1;
        const MARGIN     = 1 << 2;
        const PADDING    = 1 << 3;
        const CHILDREN   = 1 << 4;
        const VISIBILITY = 1 << 5;
    }
}
