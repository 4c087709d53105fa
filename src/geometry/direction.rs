// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compass directions used by spatial constraints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A direction argument of a spatial constraint.
///
/// `ADJACENT(a, b, North)` reads "a is directly north of b". `Any` accepts
/// whichever of the four sides works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Any,
}

impl Direction {
    /// The four concrete sides, in the order candidates are generated for `Any`.
    pub const SIDES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The direction seen from the other endpoint. `Any` is its own opposite.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Any => Direction::Any,
        }
    }

    /// Concrete sides this direction stands for.
    pub fn sides(self) -> &'static [Direction] {
        match self {
            Direction::North => &Self::SIDES[0..1],
            Direction::South => &Self::SIDES[1..2],
            Direction::East => &Self::SIDES[2..3],
            Direction::West => &Self::SIDES[3..4],
            Direction::Any => &Self::SIDES,
        }
    }

    /// True for North/South, whose alignment is measured along the x axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Any => "any",
        };
        f.write_str(name)
    }
}

/// Error returned when a direction token is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction '{0}' (expected n/s/e/w/a, a full name, or *)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            "a" | "any" | "*" => Ok(Direction::Any),
            _ => Err(ParseDirectionError(s.trim().to_string())),
        }
    }
}
