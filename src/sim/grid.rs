//! Solidity grid
//!
//! Per-cell occupancy map gating movement. Anything outside the grid is
//! solid, so callers never need to bounds-check before asking.

use glam::IVec2;

use super::tilemap::{TILE_WALL, Tilemap};

/// Bounds-checked occupancy map over the stage layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidityGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl SolidityGrid {
    /// Create an all-free grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![false; width * height],
        }
    }

    /// Build the initial grid from a tile map: walls are solid, everything
    /// else starts free (stars mark themselves when they are created).
    pub fn from_tilemap(map: &Tilemap) -> Self {
        let (width, height) = (map.width as i32, map.height as i32);
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| map.tile(x, y) == TILE_WALL))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Is the cell solid? Out of bounds always is.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_none_or(|i| self.cells[i])
    }

    /// Set a cell's occupancy. Out-of-bounds writes are ignored.
    pub fn set_solid(&mut self, x: i32, y: i32, value: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = value;
        }
    }

    #[inline]
    pub fn is_solid_at(&self, pos: IVec2) -> bool {
        self.is_solid(pos.x, pos.y)
    }

    #[inline]
    pub fn set_solid_at(&mut self, pos: IVec2, value: bool) {
        self.set_solid(pos.x, pos.y, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grid_set_and_query() {
        let mut grid = SolidityGrid::new(4, 3);
        assert!(!grid.is_solid(2, 1));
        grid.set_solid(2, 1, true);
        assert!(grid.is_solid(2, 1));
        assert!(!grid.is_solid(1, 2));
        grid.set_solid(2, 1, false);
        assert!(!grid.is_solid(2, 1));
    }

    #[test]
    fn test_grid_edges_are_solid() {
        let grid = SolidityGrid::new(4, 3);
        assert!(grid.is_solid(-1, 0));
        assert!(grid.is_solid(0, -1));
        assert!(grid.is_solid(4, 0));
        assert!(grid.is_solid(0, 3));
        assert!(!grid.is_solid(3, 2));
    }

    #[test]
    fn test_grid_from_tilemap_marks_walls_only() {
        let map = Tilemap::new("walls", 3, 1, vec![1, 2, 5]);
        let grid = SolidityGrid::from_tilemap(&map);
        assert!(grid.is_solid(0, 0));
        assert!(!grid.is_solid(1, 0));
        // Stars register themselves later
        assert!(!grid.is_solid(2, 0));
    }

    #[test]
    fn test_grid_from_short_tilemap_is_full_size() {
        let map = Tilemap::new("short", 2, 2, vec![1]);
        let mut grid = SolidityGrid::from_tilemap(&map);
        assert!(grid.is_solid(0, 0));
        assert!(!grid.is_solid(1, 1));
        grid.set_solid(1, 1, true);
        assert!(grid.is_solid(1, 1));
    }

    proptest! {
        #[test]
        fn prop_out_of_bounds_is_solid_and_immutable(
            x in -50i32..50,
            y in -50i32..50,
            value in any::<bool>(),
        ) {
            let mut grid = SolidityGrid::new(7, 5);
            grid.set_solid(3, 3, true);
            let before = grid.clone();
            let inside = (0..7).contains(&x) && (0..5).contains(&y);
            prop_assume!(!inside);

            prop_assert!(grid.is_solid(x, y));
            grid.set_solid(x, y, value);
            prop_assert_eq!(grid, before);
        }
    }
}
