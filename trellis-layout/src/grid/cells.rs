//! Cell table - which child occupies which grid cell.

use trellis_scene::{GridPlacement, NodeId, SceneTree};

use crate::error::LayoutError;

/// One addressable (row, column) slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellInfo {
    occupant: Option<NodeId>,
}

impl CellInfo {
    pub fn occupant(&self) -> Option<NodeId> {
        self.occupant
    }
}

/// A child and the cells it claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridItem {
    pub node: NodeId,
    pub placement: GridPlacement,
}

/// Row-major `rows x columns` table built from the children of one panel.
#[derive(Debug, Clone)]
pub struct CellTable {
    owner: NodeId,
    rows: usize,
    columns: usize,
    cells: Vec<CellInfo>,
    items: Vec<GridItem>,
}

impl CellTable {
    /// Claim cells for every child of `owner` from its grid placement.
    ///
    /// A spanning child claims every cell it covers. Missing placements,
    /// placements running off the grid, and overlapping claims are errors.
    pub fn build(
        tree: &SceneTree,
        owner: NodeId,
        rows: usize,
        columns: usize,
    ) -> Result<Self, LayoutError> {
        let mut table = Self {
            owner,
            rows,
            columns,
            cells: vec![CellInfo::default(); rows * columns],
            items: Vec::new(),
        };

        for &child in tree.children(owner)? {
            let placement = tree
                .node(child)?
                .grid_placement()
                .ok_or(LayoutError::MissingPlacement { node: child })?;
            table.claim(child, placement)?;
        }

        tracing::debug!(%owner, rows, columns, items = table.items.len(), "built grid cell table");
        Ok(table)
    }

    fn claim(&mut self, node: NodeId, placement: GridPlacement) -> Result<(), LayoutError> {
        if !placement.fits(self.rows, self.columns) {
            return Err(LayoutError::PlacementOutOfBounds {
                node,
                row: placement.row,
                column: placement.column,
                rows: self.rows,
                columns: self.columns,
            });
        }

        for row in placement.row..=placement.last_row() {
            for column in placement.column..=placement.last_column() {
                let index = row * self.columns + column;
                if let Some(occupant) = self.cells[index].occupant {
                    return Err(LayoutError::CellCollision {
                        node,
                        occupant,
                        row,
                        column,
                    });
                }
                self.cells[index].occupant = Some(node);
            }
        }

        self.items.push(GridItem { node, placement });
        Ok(())
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellInfo> {
        if row < self.rows && column < self.columns {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// Placed children in tree order.
    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    /// Whether the table was built from exactly these children.
    pub fn matches_children(&self, children: &[NodeId]) -> bool {
        self.items.len() == children.len()
            && self.items.iter().zip(children).all(|(item, child)| item.node == *child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_scene::Size;

    fn panel(placements: &[Option<GridPlacement>]) -> (SceneTree, NodeId, Vec<NodeId>) {
        let mut tree = SceneTree::new();
        let root = tree.create_root(Size::ZERO);
        let children = placements
            .iter()
            .map(|placement| {
                let child = tree.add_child(root, Size::ZERO).unwrap();
                if let Some(placement) = placement {
                    tree.set_grid_placement(child, *placement).unwrap();
                }
                child
            })
            .collect();
        (tree, root, children)
    }

    #[test]
    fn test_span_claims_every_covered_cell() {
        let (tree, root, kids) = panel(&[
            Some(GridPlacement::new(0, 0).with_span(2, 2)),
            Some(GridPlacement::new(2, 1)),
        ]);
        let table = CellTable::build(&tree, root, 3, 3).unwrap();

        for (row, column) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert_eq!(table.cell(row, column).unwrap().occupant(), Some(kids[0]));
        }
        assert_eq!(table.cell(2, 1).unwrap().occupant(), Some(kids[1]));
        assert_eq!(table.cell(0, 2).unwrap().occupant(), None);
        assert!(table.cell(3, 0).is_none());
        assert!(table.matches_children(&kids));
    }

    #[test]
    fn test_missing_placement_names_child() {
        let (tree, root, kids) = panel(&[Some(GridPlacement::new(0, 0)), None]);
        match CellTable::build(&tree, root, 2, 2) {
            Err(LayoutError::MissingPlacement { node }) => assert_eq!(node, kids[1]),
            other => panic!("expected missing placement, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_bounds_span() {
        let (tree, root, _) = panel(&[Some(GridPlacement::new(1, 1).with_span(1, 2))]);
        assert!(matches!(
            CellTable::build(&tree, root, 2, 2),
            Err(LayoutError::PlacementOutOfBounds { row: 1, column: 1, .. })
        ));
    }

    #[test]
    fn test_oversized_span_is_out_of_bounds() {
        let huge = GridPlacement { row_span: usize::MAX, ..GridPlacement::new(1, 0) };
        let (tree, root, kids) = panel(&[Some(huge)]);
        match CellTable::build(&tree, root, 1, 1) {
            Err(LayoutError::PlacementOutOfBounds { node, row, rows, .. }) => {
                assert_eq!((node, row, rows), (kids[0], 1, 1));
            }
            other => panic!("expected out of bounds, got {other:?}"),
        }
    }

    #[test]
    fn test_overlapping_spans_collide() {
        let (tree, root, kids) = panel(&[
            Some(GridPlacement::new(0, 0).with_span(1, 2)),
            Some(GridPlacement::new(0, 1)),
        ]);
        match CellTable::build(&tree, root, 1, 2) {
            Err(LayoutError::CellCollision { node, occupant, row, column }) => {
                assert_eq!((node, occupant, row, column), (kids[1], kids[0], 0, 1));
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }
}
