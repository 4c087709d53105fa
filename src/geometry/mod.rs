// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Geometric types for tile layouts.
//!
//! This module contains the plain value types the solver works with:
//! - Position / Rect: world coordinates (y grows downward)
//! - Direction: compass argument of spatial constraints
//! - Tile: immutable occupancy mask
//! - Component: a named tile plus its placement state

pub mod component;
pub mod direction;
pub mod rect;
pub mod tile;

// Re-export for convenience
pub use component::{tiles_collide, Component, ComponentId};
pub use direction::{Direction, ParseDirectionError};
pub use rect::{span_overlap, Position, Rect};
pub use tile::{Tile, BLANK};
