// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Occupancy masks for tiles.
//!
//! A tile is a rectangle of characters. The space character is *blank*: it is
//! transparent and never collides. Every other character is *filled* and takes
//! part in overlap tests, so two tiles may share bounding-box area as long as
//! no two filled cells land on the same world coordinate.

use crate::error::{LayoutError, Result};

/// The transparent cell character.
pub const BLANK: char = ' ';

/// Tab stops used when reading ASCII art; a tab becomes blanks up to the
/// next multiple of this width.
pub const TAB_WIDTH: usize = 8;

/// An immutable rectangular occupancy mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    width: i32,
    height: i32,
    /// Row-major cells, `width * height` long.
    cells: Vec<char>,
}

impl Tile {
    /// Build a tile from explicit dimensions and row-major cells.
    pub fn new(width: i32, height: i32, cells: Vec<char>) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(LayoutError::InvalidDimensions { width, height });
        }
        let expected = (width * height) as usize;
        if cells.len() != expected {
            return Err(LayoutError::MaskSizeMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse newline-separated ASCII art.
    ///
    /// The width is the longest line; shorter lines are padded with blanks.
    /// Trailing `\r` is dropped and a trailing newline does not add a row.
    /// Tabs expand to blanks at [`TAB_WIDTH`] stops.
    /// Returns `None` when the art has no cells at all.
    pub fn from_ascii(art: &str) -> Option<Self> {
        let rows: Vec<Vec<char>> = art
            .strip_suffix('\n')
            .unwrap_or(art)
            .split('\n')
            .map(|line| expand_tabs(line.trim_end_matches('\r')))
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return None;
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let pad = width - row.len();
            cells.extend(row);
            cells.extend(std::iter::repeat(BLANK).take(pad));
        }
        Some(Self {
            width: width as i32,
            height: height as i32,
            cells,
        })
    }

    /// Fully filled rectangle of `fill`. Handy for tests and probes.
    pub fn solid(width: i32, height: i32, fill: char) -> Result<Self> {
        let len = (width.max(0) * height.max(0)) as usize;
        Self::new(width, height, vec![fill; len])
    }

    /// A box drawn with `+`, `-` and `|`, blank inside.
    pub fn outline(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(LayoutError::InvalidDimensions { width, height });
        }
        let mut cells = Vec::with_capacity((width * height) as usize);
        for row in 0..height {
            for col in 0..width {
                let top_or_bottom = row == 0 || row == height - 1;
                let side = col == 0 || col == width - 1;
                cells.push(match (top_or_bottom, side) {
                    (true, true) => '+',
                    (true, false) => '-',
                    (false, true) => '|',
                    (false, false) => BLANK,
                });
            }
        }
        Self::new(width, height, cells)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Character at local `(col, row)`; blank outside the mask.
    pub fn cell(&self, col: i32, row: i32) -> char {
        if col < 0 || row < 0 || col >= self.width || row >= self.height {
            return BLANK;
        }
        self.cells[(row * self.width + col) as usize]
    }

    pub fn is_filled(&self, col: i32, row: i32) -> bool {
        self.cell(col, row) != BLANK
    }

    /// Iterate over filled cells as `(col, row, char)`.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32, char)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != BLANK)
            .map(move |(i, &c)| (i as i32 % width, i as i32 / width, c))
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != BLANK).count()
    }

    /// Rows as strings, trailing blanks kept.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().collect())
    }
}

fn expand_tabs(line: &str) -> Vec<char> {
    let mut row = Vec::with_capacity(line.len());
    for c in line.chars() {
        if c == '\t' {
            let stop = (row.len() / TAB_WIDTH + 1) * TAB_WIDTH;
            row.resize(stop, BLANK);
        } else {
            row.push(c);
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii_expands_tabs_to_blanks() {
        let tile = Tile::from_ascii("#\t#\n\t  #").unwrap();
        assert_eq!((tile.width(), tile.height()), (11, 2));
        assert!(tile.is_filled(0, 0));
        assert!(tile.is_filled(8, 0));
        assert!(!tile.is_filled(1, 0));
        assert!(!tile.is_filled(0, 1));
        assert!(tile.is_filled(10, 1));
        assert_eq!(tile.filled_count(), 3);
    }

    #[test]
    fn test_from_ascii_pads_short_rows() {
        let tile = Tile::from_ascii("+--+\n|\n+--+").unwrap();
        assert_eq!(tile.width(), 4);
        assert_eq!(tile.height(), 3);
        assert_eq!(tile.cell(0, 1), '|');
        assert_eq!(tile.cell(3, 1), BLANK);
    }

    #[test]
    fn test_from_ascii_ignores_trailing_newline_and_cr() {
        let tile = Tile::from_ascii("ab\r\ncd\n").unwrap();
        assert_eq!((tile.width(), tile.height()), (2, 2));
        assert_eq!(tile.rows().collect::<Vec<_>>(), vec!["ab", "cd"]);
    }

    #[test]
    fn test_from_ascii_empty() {
        assert!(Tile::from_ascii("").is_none());
        assert!(Tile::from_ascii("\n").is_none());
    }

    #[test]
    fn test_new_validates_sizes() {
        assert_eq!(
            Tile::new(2, 2, vec!['x'; 3]),
            Err(LayoutError::MaskSizeMismatch {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            Tile::new(0, 2, vec![]),
            Err(LayoutError::InvalidDimensions {
                width: 0,
                height: 2
            })
        );
    }

    #[test]
    fn test_outline_has_blank_interior() {
        let tile = Tile::outline(5, 4).unwrap();
        assert_eq!(tile.cell(0, 0), '+');
        assert_eq!(tile.cell(2, 0), '-');
        assert_eq!(tile.cell(4, 2), '|');
        assert!(!tile.is_filled(2, 2));
        assert_eq!(tile.filled_count(), 2 * 5 + 2 * 2);
    }

    #[test]
    fn test_filled_cells_coordinates() {
        let tile = Tile::from_ascii("x \n y").unwrap();
        let cells: Vec<_> = tile.filled_cells().collect();
        assert_eq!(cells, vec![(0, 0, 'x'), (1, 1, 'y')]);
    }
}
