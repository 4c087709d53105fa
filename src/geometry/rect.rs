// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! World-coordinate positions and rectangles.
//!
//! The y axis grows downward: "north" is smaller y.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A half-open rectangle `[x, x+width) × [y, y+height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(position: Position, width: i32, height: i32) -> Self {
        Self::new(position.x, position.y, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// One past the rightmost column.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True when `other` lies entirely inside `self`. Empty rectangles are
    /// contained everywhere.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.right() <= self.right()
                && other.bottom() <= self.bottom())
    }

    /// Smallest rectangle covering both. An empty side is ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        span_overlap(self.x, self.width, other.x, other.width) > 0
            && span_overlap(self.y, self.height, other.y, other.height) > 0
    }
}

/// Length of the overlap between spans `[a, a+a_len)` and `[b, b+b_len)`.
pub fn span_overlap(a: i32, a_len: i32, b: i32, b_len: i32) -> i32 {
    let start = a.max(b);
    let end = (a + a_len).min(b + b_len);
    (end - start).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_overlap() {
        assert_eq!(span_overlap(0, 4, 2, 4), 2);
        assert_eq!(span_overlap(0, 4, 4, 4), 0);
        assert_eq!(span_overlap(0, 10, 3, 2), 2);
        assert_eq!(span_overlap(5, 2, 0, 3), 0);
    }

    #[test]
    fn test_union_and_contains() {
        let a = Rect::new(0, 0, 3, 3);
        let b = Rect::new(-2, 5, 1, 1);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(-2, 0, 5, 6));
        assert!(u.contains_rect(&a));
        assert!(u.contains_rect(&b));
        assert!(!a.contains_rect(&b));
    }

    #[test]
    fn test_union_with_empty() {
        let a = Rect::new(1, 1, 2, 2);
        assert_eq!(Rect::new(0, 0, 0, 0).union(&a), a);
        assert_eq!(a.union(&Rect::new(9, 9, 0, 5)), a);
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 4, 3);
        let b = Rect::new(0, 3, 4, 3);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(3, 2, 4, 3)));
    }
}
