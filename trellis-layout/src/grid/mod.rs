//! Grid layout - children placed into cells of a row/column grid.
//!
//! # Sizing
//!
//! Each axis is resolved on its own against the panel's content area:
//!
//! 1. Pixel tracks keep their length.
//! 2. Auto tracks take the largest margin-adjusted extent among the
//!    children sitting in them with a span of 1 on that axis.
//! 3. Star tracks split what is left, proportionally to their weight.
//!
//! A child's position is the sum of the tracks before it; its area is the
//! sum of the tracks it spans.
//!
//! The cell table is built on the first pass and cached until
//! [`GridLayout::reset_cells`] is called. It is tied to the node it was built
//! for, so one instance serves one panel at a time.

mod cells;
mod dimension;

pub use cells::{CellInfo, CellTable, GridItem};
pub use dimension::{DimensionDefinition, UnitKind};

use std::cell::RefCell;

use trellis_scene::{NodeId, Point, PropertyMask, SceneTree, Size};

use crate::error::{DimensionError, LayoutError};
use crate::strategy::{LayoutStrategy, LockState};

#[derive(Debug)]
pub struct GridLayout {
    rows: Vec<DimensionDefinition>,
    columns: Vec<DimensionDefinition>,
    lock: LockState,
    cells: RefCell<Option<CellTable>>,
    resolved: RefCell<Option<ResolvedTracks>>,
}

/// Track sizes from the most recent pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTracks {
    pub rows: Vec<DimensionDefinition>,
    pub columns: Vec<DimensionDefinition>,
}

/// Sums feeding star distribution on one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct UnitTotals {
    stars: f32,
    pixels: f32,
}

impl GridLayout {
    /// Parse row and column size strings.
    pub fn new<R, C>(rows: R, columns: C) -> Result<Self, DimensionError>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Ok(Self::from_definitions(parse_tracks(rows)?, parse_tracks(columns)?))
    }

    /// Build from already parsed definitions. An empty axis becomes a
    /// single `1*` track.
    pub fn from_definitions(
        rows: Vec<DimensionDefinition>,
        columns: Vec<DimensionDefinition>,
    ) -> Self {
        Self {
            rows: or_single_star(rows),
            columns: or_single_star(columns),
            lock: LockState::new(),
            cells: RefCell::new(None),
            resolved: RefCell::new(None),
        }
    }

    pub fn rows(&self) -> &[DimensionDefinition] {
        &self.rows
    }

    pub fn columns(&self) -> &[DimensionDefinition] {
        &self.columns
    }

    /// Replace the row definitions. Dropped if the layout is locked.
    pub fn set_rows(&mut self, rows: Vec<DimensionDefinition>) {
        if self.lock.is_locked() {
            tracing::warn!("grid layout is locked, row change dropped");
            return;
        }
        self.rows = or_single_star(rows);
        self.reset_cells();
    }

    /// Replace the column definitions. Dropped if the layout is locked.
    pub fn set_columns(&mut self, columns: Vec<DimensionDefinition>) {
        if self.lock.is_locked() {
            tracing::warn!("grid layout is locked, column change dropped");
            return;
        }
        self.columns = or_single_star(columns);
        self.reset_cells();
    }

    /// Drop the cached cell table and the last resolved track sizes so the
    /// next pass rebuilds both, possibly for a different node.
    pub fn reset_cells(&self) {
        self.cells.borrow_mut().take();
        self.resolved.borrow_mut().take();
    }

    pub fn has_cell_table(&self) -> bool {
        self.cells.borrow().is_some()
    }

    /// Track sizes computed by the last successful pass. Like the cell table
    /// this is per instance, not per node.
    pub fn resolved_tracks(&self) -> Option<ResolvedTracks> {
        self.resolved.borrow().clone()
    }

    /// Placed items from the cached table, building it if needed.
    ///
    /// A table belongs to the node it was built for. Any other node is
    /// refused so its children are never written with another panel's items.
    fn cached_items(&self, tree: &SceneTree, node: NodeId) -> Result<Vec<GridItem>, LayoutError> {
        let mut cache = self.cells.borrow_mut();
        if let Some(table) = cache.as_ref() {
            if table.owner() != node {
                return Err(LayoutError::SharedCellTable {
                    owner: table.owner(),
                    node,
                });
            }
            if !table.matches_children(tree.children(node)?) {
                tracing::warn!(%node, "grid children changed since the cell table was built");
            }
            return Ok(table.items().to_vec());
        }

        let table = CellTable::build(tree, node, self.rows.len(), self.columns.len())?;
        let items = table.items().to_vec();
        *cache = Some(table);
        Ok(items)
    }
}

impl LayoutStrategy for GridLayout {
    fn name(&self) -> &'static str {
        "grid"
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
        let items = self.cached_items(tree, node)?;
        let content = tree.node(node)?.content_area();

        let mut row_auto = vec![0.0f32; self.rows.len()];
        let mut column_auto = vec![0.0f32; self.columns.len()];
        for item in &items {
            let child = tree.node(item.node)?;
            let area = child.margin().adjust(child.actual_size(), Size::ZERO);
            if item.placement.row_span <= 1 {
                let slot = &mut row_auto[item.placement.row];
                *slot = slot.max(area.height);
            }
            if item.placement.column_span <= 1 {
                let slot = &mut column_auto[item.placement.column];
                *slot = slot.max(area.width);
            }
        }

        let rows = resolve_axis(&self.rows, &row_auto, content.height);
        let columns = resolve_axis(&self.columns, &column_auto, content.width);
        let row_offsets = offsets(&rows);
        let column_offsets = offsets(&columns);

        for item in &items {
            let GridItem { node: child, placement } = *item;
            let row_end = placement.last_row() + 1;
            let column_end = placement.last_column() + 1;
            let pos = Point::new(column_offsets[placement.column], row_offsets[placement.row]);
            let area = Size::new(
                column_offsets[column_end] - pos.x,
                row_offsets[row_end] - pos.y,
            );
            tree.set_layout_area_pos(child, pos)?;
            tree.set_layout_area(child, area)?;
        }

        tracing::debug!(
            %node,
            rows = rows.len(),
            columns = columns.len(),
            items = items.len(),
            "grid pass"
        );
        *self.resolved.borrow_mut() = Some(ResolvedTracks { rows, columns });
        Ok(())
    }
}

fn parse_tracks<I>(specs: I) -> Result<Vec<DimensionDefinition>, DimensionError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    specs
        .into_iter()
        .map(|spec| DimensionDefinition::parse(spec.as_ref()))
        .collect()
}

fn or_single_star(tracks: Vec<DimensionDefinition>) -> Vec<DimensionDefinition> {
    if tracks.is_empty() {
        vec![DimensionDefinition::stars(1.0)]
    } else {
        tracks
    }
}

fn unit_totals(tracks: &[DimensionDefinition]) -> UnitTotals {
    tracks
        .iter()
        .fold(UnitTotals::default(), |mut totals, track| {
            match track.kind() {
                UnitKind::Stars => totals.stars += track.value(),
                UnitKind::Pixels | UnitKind::Auto => totals.pixels += track.resolved_pixels(),
            }
            totals
        })
}

/// Resolve one axis: auto tracks from content, then stars from the rest.
fn resolve_axis(
    tracks: &[DimensionDefinition],
    auto_extents: &[f32],
    extent: f32,
) -> Vec<DimensionDefinition> {
    let mut resolved = tracks.to_vec();
    for (track, &content) in resolved.iter_mut().zip(auto_extents) {
        if track.kind() == UnitKind::Auto {
            track.resolve(content);
        }
    }

    let totals = unit_totals(&resolved);
    let remaining = (extent - totals.pixels).max(0.0);
    for track in &mut resolved {
        if track.kind() == UnitKind::Stars {
            let share = if totals.stars > 0.0 {
                remaining * track.value() / totals.stars
            } else {
                0.0
            };
            track.resolve(share);
        }
    }
    resolved
}

/// Start offset of each track, plus the total extent as a final entry.
fn offsets(tracks: &[DimensionDefinition]) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(tracks.len() + 1);
    let mut cursor = 0.0f32;
    offsets.push(cursor);
    for track in tracks {
        cursor += track.resolved_pixels();
        offsets.push(cursor);
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_scene::{GridPlacement, Margin};

    fn grid_panel(size: Size) -> (SceneTree, NodeId) {
        let mut tree = SceneTree::new();
        let root = tree.create_root(size);
        let panel = tree.add_child(root, Size::ZERO).unwrap();
        tree.set_layout_area(panel, size).unwrap();
        (tree, panel)
    }

    fn place(tree: &mut SceneTree, panel: NodeId, size: (f32, f32), at: GridPlacement) -> NodeId {
        let child = tree.add_child(panel, size.into()).unwrap();
        tree.set_grid_placement(child, at).unwrap();
        child
    }

    fn rect_of(tree: &SceneTree, id: NodeId) -> (f32, f32, f32, f32) {
        let r = tree.node(id).unwrap().layout_rect();
        (r.x, r.y, r.width, r.height)
    }

    fn resolved(tracks: &[DimensionDefinition]) -> Vec<f32> {
        tracks.iter().map(DimensionDefinition::resolved_pixels).collect()
    }

    #[test]
    fn test_pixels_and_stars_fill_extent() {
        let (mut tree, panel) = grid_panel(Size::new(400.0, 300.0));
        let a = place(&mut tree, panel, (0.0, 0.0), GridPlacement::new(0, 0));
        let b = place(&mut tree, panel, (0.0, 0.0), GridPlacement::new(1, 2));

        let grid = GridLayout::new(["100", "*"], ["100", "1*", "2*"]).unwrap();
        grid.update_layout(&mut tree, panel).unwrap();

        let tracks = grid.resolved_tracks().unwrap();
        assert_eq!(resolved(&tracks.rows), vec![100.0, 200.0]);
        assert_eq!(resolved(&tracks.columns), vec![100.0, 100.0, 200.0]);
        assert_eq!(rect_of(&tree, a), (0.0, 0.0, 100.0, 100.0));
        assert_eq!(rect_of(&tree, b), (200.0, 100.0, 200.0, 200.0));
        assert!(!tree.is_layout_dirty(panel).unwrap());
    }

    #[test]
    fn test_auto_tracks_follow_content() {
        let (mut tree, panel) = grid_panel(Size::new(300.0, 200.0));
        let label = place(&mut tree, panel, (40.0, 18.0), GridPlacement::new(0, 0));
        tree.set_margin(label, Margin::symmetric(5.0, 1.0)).unwrap();
        place(&mut tree, panel, (70.0, 12.0), GridPlacement::new(1, 0));
        let body = place(&mut tree, panel, (0.0, 0.0), GridPlacement::new(0, 1).with_span(2, 1));

        let grid = GridLayout::new(["auto", "Auto"], ["auto", "*"]).unwrap();
        grid.update_layout(&mut tree, panel).unwrap();

        let tracks = grid.resolved_tracks().unwrap();
        assert_eq!(resolved(&tracks.rows), vec![20.0, 12.0]);
        assert_eq!(resolved(&tracks.columns), vec![70.0, 230.0]);
        assert_eq!(rect_of(&tree, body), (70.0, 0.0, 230.0, 32.0));
    }

    #[test]
    fn test_stars_never_go_negative() {
        let (mut tree, panel) = grid_panel(Size::new(100.0, 100.0));
        place(&mut tree, panel, (0.0, 0.0), GridPlacement::new(0, 1));

        let grid = GridLayout::new(["*"], ["150", "*"]).unwrap();
        grid.update_layout(&mut tree, panel).unwrap();

        let tracks = grid.resolved_tracks().unwrap();
        assert_eq!(resolved(&tracks.columns), vec![150.0, 0.0]);
    }

    #[test]
    fn test_spanning_child_covers_tracks() {
        let (mut tree, panel) = grid_panel(Size::new(300.0, 90.0));
        let wide = place(&mut tree, panel, (0.0, 0.0), GridPlacement::new(0, 0).with_span(1, 3));

        let grid = GridLayout::new(["30", "30", "30"], ["*", "*", "*"]).unwrap();
        grid.update_layout(&mut tree, panel).unwrap();

        assert_eq!(rect_of(&tree, wide), (0.0, 0.0, 300.0, 30.0));
    }

    #[test]
    fn test_empty_axis_is_one_star() {
        let (mut tree, panel) = grid_panel(Size::new(120.0, 80.0));
        let only = place(&mut tree, panel, (0.0, 0.0), GridPlacement::new(0, 0));

        let grid = GridLayout::new(Vec::<String>::new(), Vec::<&str>::new()).unwrap();
        grid.update_layout(&mut tree, panel).unwrap();

        assert_eq!(rect_of(&tree, only), (0.0, 0.0, 120.0, 80.0));
    }

    #[test]
    fn test_uses_content_area_not_layout_area() {
        let (mut tree, panel) = grid_panel(Size::new(200.0, 100.0));
        tree.set_padding(panel, Margin::all(10.0)).unwrap();
        let child = place(&mut tree, panel, (0.0, 0.0), GridPlacement::new(0, 0));

        GridLayout::new(["*"], ["*"]).unwrap().update_layout(&mut tree, panel).unwrap();

        assert_eq!(rect_of(&tree, child), (0.0, 0.0, 180.0, 80.0));
    }

    #[test]
    fn test_missing_placement_keeps_panel_dirty() {
        let (mut tree, panel) = grid_panel(Size::new(100.0, 100.0));
        let stray = tree.add_child(panel, Size::ZERO).unwrap();

        let grid = GridLayout::new(["*"], ["*"]).unwrap();
        match grid.update_layout(&mut tree, panel) {
            Err(LayoutError::MissingPlacement { node }) => assert_eq!(node, stray),
            other => panic!("expected missing placement, got {other:?}"),
        }
        assert!(tree.is_layout_dirty(panel).unwrap());
        assert!(!grid.has_cell_table());
    }

    #[test]
    fn test_cell_table_is_cached_until_reset() {
        let (mut tree, panel) = grid_panel(Size::new(100.0, 100.0));
        let first = place(&mut tree, panel, (0.0, 0.0), GridPlacement::new(0, 0));

        let grid = GridLayout::new(["*", "*"], ["*"]).unwrap();
        grid.update_layout(&mut tree, panel).unwrap();
        assert!(grid.has_cell_table());

        // A child added after the first build is not seen by the cached table.
        let late = place(&mut tree, panel, (0.0, 0.0), GridPlacement::new(1, 0));
        grid.update_layout(&mut tree, panel).unwrap();
        assert_eq!(rect_of(&tree, late), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(rect_of(&tree, first), (0.0, 0.0, 100.0, 50.0));

        grid.reset_cells();
        assert!(grid.resolved_tracks().is_none());
        tree.mark_layout_dirty(panel).unwrap();
        grid.update_layout(&mut tree, panel).unwrap();
        assert_eq!(rect_of(&tree, late), (0.0, 50.0, 100.0, 50.0));
    }

    #[test]
    fn test_table_is_refused_for_another_panel() {
        let (mut tree, first) = grid_panel(Size::new(200.0, 100.0));
        let root = tree.parent(first).unwrap().unwrap();
        let second = tree.add_child(root, Size::ZERO).unwrap();
        tree.set_layout_area(second, Size::new(50.0, 50.0)).unwrap();
        let a = place(&mut tree, first, (0.0, 0.0), GridPlacement::new(0, 0));
        let b = place(&mut tree, second, (0.0, 0.0), GridPlacement::new(0, 0));

        let grid = GridLayout::new(["*"], ["*"]).unwrap();
        grid.update_layout(&mut tree, first).unwrap();

        match grid.update_layout(&mut tree, second) {
            Err(LayoutError::SharedCellTable { owner, node }) => {
                assert_eq!((owner, node), (first, second));
            }
            other => panic!("expected shared table error, got {other:?}"),
        }
        assert!(tree.is_layout_dirty(second).unwrap());
        assert_eq!(rect_of(&tree, a), (0.0, 0.0, 200.0, 100.0));
        assert_eq!(rect_of(&tree, b), (0.0, 0.0, 0.0, 0.0));

        // After a reset the instance can move to the other panel.
        grid.reset_cells();
        grid.update_layout(&mut tree, second).unwrap();
        assert_eq!(rect_of(&tree, b), (0.0, 0.0, 50.0, 50.0));
        assert_eq!(rect_of(&tree, a), (0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_locked_grid_keeps_definitions() {
        let mut grid = GridLayout::new(["10"], ["20"]).unwrap();
        grid.set_rows(vec![DimensionDefinition::auto()]);
        assert_eq!(grid.rows()[0].kind(), UnitKind::Auto);

        assert!(grid.lock());
        grid.set_columns(vec![DimensionDefinition::stars(3.0)]);
        assert_eq!(grid.columns(), &[DimensionDefinition::pixels(20.0)]);
    }

    #[test]
    fn test_bad_definition_fails_construction() {
        assert_eq!(
            GridLayout::new(["10", "tall"], ["*"]).unwrap_err(),
            DimensionError::InvalidLength("tall".to_string())
        );
    }

    #[test]
    fn test_column_and_row_totals_are_symmetric() {
        let tracks = [
            DimensionDefinition::pixels(40.0),
            DimensionDefinition::stars(2.0),
            DimensionDefinition::stars(0.5),
        ];
        assert_eq!(unit_totals(&tracks), UnitTotals { stars: 2.5, pixels: 40.0 });
    }
}
