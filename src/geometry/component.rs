// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Components: named tiles with placement state.

use super::{Position, Rect, Tile};

/// Index of a component inside its [`crate::context::SearchContext`].
pub type ComponentId = usize;

/// A named tile and where (if anywhere) it currently sits.
///
/// The tile never changes after creation. `position` is toggled by the solver
/// on every trial placement and rollback; after a successful solve it holds
/// the answer.
#[derive(Debug, Clone)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub tile: Tile,

    /// World coordinates of the top-left corner, `None` while unplaced.
    pub position: Option<Position>,

    /// How many times every placement option for this component ran out.
    ///
    /// Survives across solves and demotes components that keep failing
    /// when choosing a root.
    pub failed_placements: u32,
}

impl Component {
    pub fn new(id: ComponentId, name: impl Into<String>, tile: Tile) -> Self {
        Self {
            id,
            name: name.into(),
            tile,
            position: None,
            failed_placements: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.tile.width()
    }

    pub fn height(&self) -> i32 {
        self.tile.height()
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    /// Bounding box if placed at `position`.
    pub fn rect_at(&self, position: Position) -> Rect {
        Rect::at(position, self.width(), self.height())
    }

    /// Current bounding box, `None` while unplaced.
    pub fn rect(&self) -> Option<Rect> {
        self.position.map(|p| self.rect_at(p))
    }
}

/// True when any filled cell of `a` at `pa` coincides with a filled cell of
/// `b` at `pb`. Bounding-box overlap alone is not a collision.
pub fn tiles_collide(a: &Tile, pa: Position, b: &Tile, pb: Position) -> bool {
    let ra = Rect::at(pa, a.width(), a.height());
    let rb = Rect::at(pb, b.width(), b.height());
    if !ra.intersects(&rb) {
        return false;
    }
    a.filled_cells().any(|(col, row, _)| {
        let wx = pa.x + col;
        let wy = pa.y + row;
        rb.contains(wx, wy) && b.is_filled(wx - pb.x, wy - pb.y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donut_does_not_collide_with_content() {
        let donut = Tile::outline(5, 5).unwrap();
        let dot = Tile::solid(1, 1, '*').unwrap();
        assert!(!tiles_collide(
            &donut,
            Position::new(0, 0),
            &dot,
            Position::new(2, 2)
        ));
        assert!(tiles_collide(
            &donut,
            Position::new(0, 0),
            &dot,
            Position::new(0, 2)
        ));
    }

    #[test]
    fn test_disjoint_boxes_never_collide() {
        let a = Tile::solid(3, 3, '#').unwrap();
        assert!(!tiles_collide(&a, Position::new(0, 0), &a, Position::new(3, 0)));
        assert!(tiles_collide(&a, Position::new(0, 0), &a, Position::new(2, 2)));
    }

    #[test]
    fn test_component_rect() {
        let mut c = Component::new(0, "Hall", Tile::solid(4, 2, '#').unwrap());
        assert_eq!(c.rect(), None);
        c.position = Some(Position::new(-1, 3));
        assert_eq!(c.rect(), Some(Rect::new(-1, 3, 4, 2)));
        assert!(c.is_placed());
    }
}
