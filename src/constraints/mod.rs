// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Spatial constraints between components.
//!
//! A [`Constraint`] is pure data: a tag naming its kind, two component ids
//! and a direction argument. The behaviour behind a tag lives in a
//! [`ConstraintKind`] looked up in a [`ConstraintRegistry`], so the search
//! engine never needs to know which kinds exist.

pub mod adjacent;
pub mod registry;

use crate::geometry::{Component, ComponentId, Direction, Position};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub use adjacent::Adjacent;
pub use registry::ConstraintRegistry;

/// Index of a constraint inside its [`crate::context::SearchContext`].
pub type ConstraintId = usize;

/// Names the kind of a constraint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintTag {
    Adjacent,
}

/// A relation between components `a` and `b`.
///
/// For directional kinds the direction reads "`a` is `direction` of `b`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    pub id: ConstraintId,
    pub tag: ConstraintTag,
    pub a: ComponentId,
    pub b: ComponentId,
    pub direction: Direction,
}

impl Constraint {
    pub fn involves(&self, component: ComponentId) -> bool {
        self.a == component || self.b == component
    }

    /// The endpoint that is not `component`.
    pub fn other(&self, component: ComponentId) -> ComponentId {
        if self.a == component {
            self.b
        } else {
            self.a
        }
    }

    /// The side of the placed endpoint on which `unplaced` must go.
    pub fn side_for(&self, unplaced: ComponentId) -> Direction {
        if unplaced == self.a {
            self.direction
        } else {
            self.direction.opposite()
        }
    }
}

/// A candidate position for an unplaced component, with the side of the
/// reference component it sits on and its alignment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub position: Position,
    pub side: Direction,
    pub score: i32,
}

/// Behaviour of one constraint kind.
///
/// Implementations must be deterministic: the same inputs always produce the
/// same candidates in the same order.
pub trait ConstraintKind: std::fmt::Debug {
    fn tag(&self) -> ConstraintTag;

    /// Every position for `unplaced` that satisfies `constraint` relative to
    /// the already placed `placed`, each scored by
    /// [`ConstraintKind::score_placement`].
    fn generate_placements(
        &self,
        constraint: &Constraint,
        unplaced: &Component,
        placed: &Component,
    ) -> Vec<Candidate>;

    /// Quality of a candidate, higher is better.
    fn score_placement(
        &self,
        candidate: &Candidate,
        constraint: &Constraint,
        unplaced: &Component,
        placed: &Component,
    ) -> i32;

    /// Ground truth: does the constraint hold for the current positions of
    /// `a` and `b`? False if either is unplaced.
    fn validate(&self, constraint: &Constraint, a: &Component, b: &Component) -> bool;

    /// Human-readable name, used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_tag_parses_case_insensitively() {
        assert_eq!(
            ConstraintTag::from_str("ADJACENT").unwrap(),
            ConstraintTag::Adjacent
        );
        assert_eq!(
            ConstraintTag::from_str("adjacent").unwrap(),
            ConstraintTag::Adjacent
        );
        assert!(ConstraintTag::from_str("INSIDE").is_err());
        assert_eq!(ConstraintTag::Adjacent.to_string(), "ADJACENT");
    }

    #[test]
    fn test_side_for_each_endpoint() {
        let c = Constraint {
            id: 0,
            tag: ConstraintTag::Adjacent,
            a: 1,
            b: 2,
            direction: Direction::North,
        };
        assert_eq!(c.side_for(1), Direction::North);
        assert_eq!(c.side_for(2), Direction::South);
        assert_eq!(c.other(1), 2);
        assert_eq!(c.other(2), 1);
        assert!(c.involves(2));
        assert!(!c.involves(0));
    }
}
