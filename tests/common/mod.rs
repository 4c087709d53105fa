// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use tile_layout::{ConstraintTag, Direction, LayoutSolver, Position, SolverConfig, Tile};

/// A box-drawn room of the given size.
pub fn room(width: i32, height: i32) -> Tile {
    Tile::outline(width, height).unwrap()
}

/// A fully filled block.
pub fn block(width: i32, height: i32) -> Tile {
    Tile::solid(width, height, '#').unwrap()
}

/// A solver holding `tiles` and `ADJACENT` constraints `(a, b, direction)`.
pub fn layout(
    config: SolverConfig,
    tiles: Vec<(&str, Tile)>,
    constraints: &[(&str, &str, Direction)],
) -> LayoutSolver {
    let mut solver = LayoutSolver::with_config(config);
    for (name, tile) in tiles {
        solver.add_component(name, tile).unwrap();
    }
    for (a, b, direction) in constraints {
        solver
            .add_constraint(ConstraintTag::Adjacent, a, b, *direction)
            .unwrap();
    }
    solver
}

pub fn position(solver: &LayoutSolver, name: &str) -> Position {
    solver
        .position_of(name)
        .unwrap_or_else(|| panic!("{name} is not placed"))
}

/// Panic with every violation if the current layout is not a solution.
pub fn assert_valid(solver: &LayoutSolver) {
    let violations = solver.verify();
    assert!(
        violations.is_empty(),
        "layout has violations: {:?}\n{}",
        violations,
        solver.render()
    );
}
