// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `ADJACENT(a, b, dir)`: `a` touches `b` edge to edge on side `dir` of `b`,
//! sharing at least one cell of the perpendicular axis.

use super::{Candidate, Constraint, ConstraintKind, ConstraintTag};
use crate::geometry::{span_overlap, Component, Direction, Position, Rect};

/// Score for a candidate whose leading or trailing edge lines up with the
/// reference.
pub const EDGE_ALIGNED: i32 = 100;
/// Score for a candidate centred on the reference (same parity widths only).
pub const CENTERED: i32 = 90;

#[derive(Debug, Default, Clone, Copy)]
pub struct Adjacent;

impl Adjacent {
    /// Positions for a `width × height` component touching `placed` on
    /// `side`, sweeping the perpendicular axis in ascending order.
    fn side_positions(side: Direction, width: i32, height: i32, placed: Rect) -> Vec<Position> {
        match side {
            Direction::North | Direction::South => {
                let y = if side == Direction::North {
                    placed.y - height
                } else {
                    placed.bottom()
                };
                (placed.x - width + 1..placed.right())
                    .map(|x| Position::new(x, y))
                    .collect()
            }
            Direction::East | Direction::West => {
                let x = if side == Direction::East {
                    placed.right()
                } else {
                    placed.x - width
                };
                (placed.y - height + 1..placed.bottom())
                    .map(|y| Position::new(x, y))
                    .collect()
            }
            Direction::Any => Vec::new(),
        }
    }

    /// True when `a` sits exactly on side `side` of `b`.
    fn touches(side: Direction, a: Rect, b: Rect) -> bool {
        let x_overlap = span_overlap(a.x, a.width, b.x, b.width) > 0;
        let y_overlap = span_overlap(a.y, a.height, b.y, b.height) > 0;
        match side {
            Direction::North => a.bottom() == b.y && x_overlap,
            Direction::South => a.y == b.bottom() && x_overlap,
            Direction::East => a.x == b.right() && y_overlap,
            Direction::West => a.right() == b.x && y_overlap,
            Direction::Any => Direction::SIDES.iter().any(|&s| Self::touches(s, a, b)),
        }
    }
}

/// Alignment of span `[start, start+len)` against `[ref_start, ref_start+ref_len)`.
///
/// 100 when an edge lines up, 90 when centred, 50..=89 for other overlaps
/// (more overlap and nearer edges score higher), 1..=49 for disjoint spans
/// (smaller gaps score higher).
pub fn alignment_score(start: i32, len: i32, ref_start: i32, ref_len: i32) -> i32 {
    let end = start + len;
    let ref_end = ref_start + ref_len;
    if start == ref_start || end == ref_end {
        return EDGE_ALIGNED;
    }
    if len % 2 == ref_len % 2 && start + len / 2 == ref_start + ref_len / 2 {
        return CENTERED;
    }
    let overlap = span_overlap(start, len, ref_start, ref_len);
    if overlap > 0 {
        let edge_distance = (start - ref_start).abs().min((end - ref_end).abs());
        (50 + 2 * overlap + (10 - edge_distance)).clamp(50, 89)
    } else {
        let gap = if start >= ref_end {
            start - ref_end
        } else {
            ref_start - end
        };
        (49 - gap).clamp(1, 49)
    }
}

impl ConstraintKind for Adjacent {
    fn tag(&self) -> ConstraintTag {
        ConstraintTag::Adjacent
    }

    fn generate_placements(
        &self,
        constraint: &Constraint,
        unplaced: &Component,
        placed: &Component,
    ) -> Vec<Candidate> {
        let Some(placed_rect) = placed.rect() else {
            return Vec::new();
        };
        let mut candidates = Vec::new();
        for &side in constraint.side_for(unplaced.id).sides() {
            for position in
                Self::side_positions(side, unplaced.width(), unplaced.height(), placed_rect)
            {
                let mut candidate = Candidate {
                    position,
                    side,
                    score: 0,
                };
                candidate.score = self.score_placement(&candidate, constraint, unplaced, placed);
                candidates.push(candidate);
            }
        }
        candidates
    }

    fn score_placement(
        &self,
        candidate: &Candidate,
        _constraint: &Constraint,
        unplaced: &Component,
        placed: &Component,
    ) -> i32 {
        let Some(reference) = placed.rect() else {
            return 0;
        };
        let rect = unplaced.rect_at(candidate.position);
        if candidate.side.is_vertical() {
            alignment_score(rect.x, rect.width, reference.x, reference.width)
        } else {
            alignment_score(rect.y, rect.height, reference.y, reference.height)
        }
    }

    fn validate(&self, constraint: &Constraint, a: &Component, b: &Component) -> bool {
        match (a.rect(), b.rect()) {
            (Some(ra), Some(rb)) => Self::touches(constraint.direction, ra, rb),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Tile;

    fn component(id: usize, w: i32, h: i32, at: Option<Position>) -> Component {
        let mut c = Component::new(id, format!("C{id}"), Tile::solid(w, h, '#').unwrap());
        c.position = at;
        c
    }

    fn adjacent(a: usize, b: usize, direction: Direction) -> Constraint {
        Constraint {
            id: 0,
            tag: ConstraintTag::Adjacent,
            a,
            b,
            direction,
        }
    }

    #[test]
    fn test_north_candidates_sweep_x() {
        let room_a = component(0, 7, 5, Some(Position::new(0, 0)));
        let room_b = component(1, 4, 3, None);
        let c = adjacent(1, 0, Direction::North);

        let candidates = Adjacent.generate_placements(&c, &room_b, &room_a);
        assert_eq!(candidates.len(), 10);
        assert!(candidates.iter().all(|c| c.position.y == -3));
        assert!(candidates.iter().all(|c| c.side == Direction::North));
        assert_eq!(candidates.first().unwrap().position.x, -3);
        assert_eq!(candidates.last().unwrap().position.x, 6);

        let best: Vec<i32> = candidates
            .iter()
            .filter(|c| c.score == EDGE_ALIGNED)
            .map(|c| c.position.x)
            .collect();
        assert_eq!(best, vec![0, 3]);
    }

    #[test]
    fn test_reference_endpoint_flips_side() {
        // a is placed; b must go on the opposite side.
        let a = component(0, 3, 3, Some(Position::new(0, 0)));
        let b = component(1, 2, 2, None);
        let c = adjacent(0, 1, Direction::East);
        let candidates = Adjacent.generate_placements(&c, &b, &a);
        assert!(candidates
            .iter()
            .all(|c| c.side == Direction::West && c.position.x == -2));
    }

    #[test]
    fn test_any_unions_sides_in_order() {
        let a = component(0, 2, 2, Some(Position::new(0, 0)));
        let b = component(1, 1, 1, None);
        let c = adjacent(1, 0, Direction::Any);
        let sides: Vec<Direction> = Adjacent
            .generate_placements(&c, &b, &a)
            .iter()
            .map(|c| c.side)
            .collect();
        assert_eq!(sides.len(), 8);
        assert_eq!(
            sides,
            vec![
                Direction::North,
                Direction::North,
                Direction::South,
                Direction::South,
                Direction::East,
                Direction::East,
                Direction::West,
                Direction::West
            ]
        );
    }

    #[test]
    fn test_every_candidate_validates() {
        let a = component(0, 5, 3, Some(Position::new(2, -1)));
        for direction in [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Any,
        ] {
            let c = adjacent(1, 0, direction);
            let mut b = component(1, 3, 4, None);
            for candidate in Adjacent.generate_placements(&c, &b.clone(), &a) {
                b.position = Some(candidate.position);
                assert!(Adjacent.validate(&c, &b, &a), "{direction} {candidate:?}");
            }
        }
    }

    #[test]
    fn test_validate_is_directional() {
        let a = component(0, 2, 2, Some(Position::new(0, -2)));
        let b = component(1, 2, 2, Some(Position::new(0, 0)));
        assert!(Adjacent.validate(&adjacent(0, 1, Direction::North), &a, &b));
        assert!(!Adjacent.validate(&adjacent(0, 1, Direction::South), &a, &b));
        assert!(Adjacent.validate(&adjacent(0, 1, Direction::Any), &a, &b));
    }

    #[test]
    fn test_validate_rejects_corner_touch_and_unplaced() {
        let a = component(0, 2, 2, Some(Position::new(2, -2)));
        let b = component(1, 2, 2, Some(Position::new(0, 0)));
        assert!(!Adjacent.validate(&adjacent(0, 1, Direction::Any), &a, &b));

        let unplaced = component(2, 2, 2, None);
        assert!(!Adjacent.validate(&adjacent(2, 1, Direction::Any), &unplaced, &b));
    }

    #[test]
    fn test_alignment_score_bands() {
        assert_eq!(alignment_score(0, 4, 0, 7), EDGE_ALIGNED);
        assert_eq!(alignment_score(3, 4, 0, 7), EDGE_ALIGNED);
        assert_eq!(alignment_score(2, 3, 0, 7), CENTERED);
        // overlap 4, nearest edge 1 away
        assert_eq!(alignment_score(1, 4, 0, 7), 67);
        // overlap 1, nearest edge 3 away
        assert_eq!(alignment_score(-3, 4, 0, 7), 59);
        assert_eq!(alignment_score(10, 2, 0, 7), 46);
        assert_eq!(alignment_score(100, 2, 0, 7), 1);
    }

    #[test]
    fn test_name() {
        assert_eq!(Adjacent.name(), "Adjacent");
    }
}
