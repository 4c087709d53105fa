// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Expandable character grid.
//!
//! The grid is a dense row-major buffer covering the rectangle
//! `[min_x, min_x+width) × [min_y, min_y+height)` of world coordinates.
//! Cells outside the buffer read as blank. Growing the grid reallocates and
//! copies every written cell to its translated index, so world coordinates of
//! placed tiles never change when the origin moves (including into negative
//! coordinates).
//!
//! The grid only knows about characters. It is written exclusively through
//! [`Grid::write`] / [`Grid::erase`], which the search brackets around each
//! trial placement.

use crate::geometry::{Position, Rect, Tile, BLANK};

/// A 2-D character buffer with a movable origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    min_x: i32,
    min_y: i32,
    width: i32,
    height: i32,
    cells: Vec<char>,
}

impl Grid {
    /// An empty grid covering no cells.
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank grid covering `bounds`.
    pub fn with_bounds(bounds: Rect) -> Self {
        let mut grid = Self::new();
        grid.expand(bounds);
        grid
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.width, self.height)
    }

    /// Grow the buffer so that it covers `rect`.
    ///
    /// Returns true if the buffer was reallocated. Existing cells keep their
    /// world coordinates.
    pub fn expand(&mut self, rect: Rect) -> bool {
        if rect.is_empty() || self.bounds().contains_rect(&rect) {
            return false;
        }
        let old = self.bounds();
        let new = old.union(&rect);
        let mut cells = vec![BLANK; (new.width * new.height) as usize];
        for row in 0..old.height {
            let src = (row * old.width) as usize;
            let dst_row = old.y + row - new.y;
            let dst = (dst_row * new.width + (old.x - new.x)) as usize;
            cells[dst..dst + old.width as usize]
                .copy_from_slice(&self.cells[src..src + old.width as usize]);
        }
        self.min_x = new.x;
        self.min_y = new.y;
        self.width = new.width;
        self.height = new.height;
        self.cells = cells;
        true
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.bounds().contains(x, y) {
            Some(((y - self.min_y) * self.width + (x - self.min_x)) as usize)
        } else {
            None
        }
    }

    /// Character at world `(x, y)`; blank outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> char {
        self.index(x, y).map_or(BLANK, |i| self.cells[i])
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y) != BLANK
    }

    /// True if any cell inside `rect` is non-blank.
    pub fn rect_occupied(&self, rect: Rect) -> bool {
        (rect.y..rect.bottom()).any(|y| (rect.x..rect.right()).any(|x| self.is_occupied(x, y)))
    }

    /// Expand to cover `tile` at `at`, then report whether any of its filled
    /// cells would land on a non-blank grid cell.
    ///
    /// Blank mask cells never collide, so a hollow tile may enclose another
    /// one entirely.
    pub fn occupied_after_expand(&mut self, tile: &Tile, at: Position) -> bool {
        self.expand(Rect::at(at, tile.width(), tile.height()));
        tile.filled_cells()
            .any(|(col, row, _)| self.is_occupied(at.x + col, at.y + row))
    }

    /// Paint the filled cells of `tile` at `at`, growing the grid if needed.
    pub fn write(&mut self, tile: &Tile, at: Position) {
        self.expand(Rect::at(at, tile.width(), tile.height()));
        for (col, row, c) in tile.filled_cells() {
            if let Some(i) = self.index(at.x + col, at.y + row) {
                debug_assert_eq!(self.cells[i], BLANK, "write over occupied cell");
                self.cells[i] = c;
            }
        }
    }

    /// Blank the cells painted by `write(tile, at)`.
    pub fn erase(&mut self, tile: &Tile, at: Position) {
        for (col, row, _) in tile.filled_cells() {
            if let Some(i) = self.index(at.x + col, at.y + row) {
                self.cells[i] = BLANK;
            }
        }
    }

    /// Rows of the buffer as strings, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().collect())
    }

    /// Number of non-blank cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != BLANK).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Tile {
        Tile::from_ascii("+--+\n|  |\n+--+").unwrap()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert!(grid.bounds().is_empty());
        assert_eq!(grid.get(0, 0), BLANK);
        assert_eq!(grid.rows().count(), 0);
    }

    #[test]
    fn test_expand_preserves_cells_into_negative_coordinates() {
        let mut grid = Grid::new();
        grid.write(&room(), Position::new(0, 0));
        assert_eq!(grid.bounds(), Rect::new(0, 0, 4, 3));

        assert!(grid.expand(Rect::new(-3, -2, 2, 2)));
        assert_eq!(grid.bounds(), Rect::new(-3, -2, 7, 5));
        assert_eq!(grid.get(0, 0), '+');
        assert_eq!(grid.get(3, 2), '+');
        assert_eq!(grid.get(0, 1), '|');
        assert_eq!(grid.occupied_count(), room().filled_count());
    }

    #[test]
    fn test_expand_inside_bounds_is_noop() {
        let mut grid = Grid::with_bounds(Rect::new(0, 0, 10, 10));
        assert!(!grid.expand(Rect::new(2, 2, 3, 3)));
        assert_eq!(grid.bounds(), Rect::new(0, 0, 10, 10));
    }

    #[test]
    fn test_write_then_erase_round_trip() {
        let mut grid = Grid::new();
        grid.write(&room(), Position::new(0, 0));
        for at in [Position::new(4, 0), Position::new(-4, -3), Position::new(1, 1)] {
            let tile = Tile::from_ascii("ab\n c").unwrap();
            grid.expand(Rect::at(at, tile.width(), tile.height()));
            if grid.occupied_after_expand(&tile, at) {
                continue;
            }
            let before = grid.clone();
            grid.write(&tile, at);
            assert_ne!(grid, before);
            grid.erase(&tile, at);
            assert_eq!(grid, before);
        }
    }

    #[test]
    fn test_occupied_after_expand_ignores_blank_cells() {
        let mut grid = Grid::new();
        let donut = Tile::outline(5, 5).unwrap();
        grid.write(&donut, Position::new(0, 0));

        let center = Tile::solid(3, 3, '#').unwrap();
        assert!(!grid.occupied_after_expand(&center, Position::new(1, 1)));
        assert!(grid.occupied_after_expand(&center, Position::new(0, 1)));

        // Same hollow tile on the same spot collides on its border.
        assert!(grid.occupied_after_expand(&donut, Position::new(0, 0)));
    }

    #[test]
    fn test_occupied_after_expand_grows_grid() {
        let mut grid = Grid::new();
        grid.write(&room(), Position::new(0, 0));
        assert!(!grid.occupied_after_expand(&room(), Position::new(0, -3)));
        assert_eq!(grid.bounds(), Rect::new(0, -3, 4, 6));
    }

    #[test]
    fn test_rect_occupied() {
        let mut grid = Grid::new();
        grid.write(&room(), Position::new(0, 0));
        assert!(!grid.rect_occupied(Rect::new(1, 1, 2, 1)));
        assert!(grid.rect_occupied(Rect::new(1, 1, 3, 1)));
        assert!(!grid.rect_occupied(Rect::new(10, 10, 3, 3)));
    }

    #[test]
    fn test_rows() {
        let mut grid = Grid::new();
        grid.write(&room(), Position::new(0, 0));
        let rows: Vec<String> = grid.rows().collect();
        assert_eq!(rows, vec!["+--+", "|  |", "+--+"]);
    }
}
