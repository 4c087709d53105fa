// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Constraint-driven layout of ASCII tiles.
//!
//! Given named rectangular tiles (rooms, towers, ...) and pairwise spatial
//! constraints such as "the gate is directly south of the keep", the solver
//! finds world coordinates for every tile so that each constraint holds and no
//! two tiles share a filled cell.
//!
//! # Architecture
//!
//! ## Problem data
//!
//! - [`geometry`]: positions, rectangles, directions, tiles and components
//! - [`constraints`]: constraint records, the [`ConstraintKind`] trait and the
//!   registry mapping tags to kinds
//!
//! ## Search state
//!
//! - [`grid`]: expandable character buffer holding the placed tiles
//! - [`trail`]: record of placements and resolutions for exact rollback
//! - [`context`]: the problem plus its mutable state, and the scoped
//!   [`TrialGuard`]
//!
//! ## Search
//!
//! [`engine::TreeSolver`] runs a depth-first search. It places the most
//! constrained component first, then repeatedly picks a constraint linking
//! the placed set to an unplaced component, tries that constraint's candidate
//! positions best-first, and backtracks when a subtree fails. Observers in
//! [`diagnostics`] watch the search without influencing it.
//!
//! ## Around the core
//!
//! - [`dsl`]: markdown layout descriptions
//! - [`render`]: ASCII output
//! - [`config`]: TOML solver configuration
//!
//! # Example
//!
//! ```
//! use tile_layout::{ConstraintTag, Direction, LayoutSolver};
//!
//! let mut solver = LayoutSolver::new();
//! solver.add_component_ascii("Keep", "+----+\n|    |\n+----+").unwrap();
//! solver.add_component_ascii("Gate", "+--+").unwrap();
//! solver
//!     .add_constraint(ConstraintTag::Adjacent, "Gate", "Keep", Direction::South)
//!     .unwrap();
//!
//! let report = solver.solve().unwrap();
//! assert_eq!(report.backtracks, 0);
//! print!("{}", solver.render());
//! ```

pub mod config;
pub mod constraints;
pub mod context;
pub mod diagnostics;
pub mod dsl;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod render;
pub mod solver;
pub mod state;
pub mod trail;

// Re-export commonly used types
pub use config::SolverConfig;
pub use constraints::{ConstraintKind, ConstraintRegistry, ConstraintTag};
pub use context::{SearchContext, TrialGuard, Violation};
pub use engine::{SolveFailure, SolveReport, TreeSolver};
pub use error::LayoutError;
pub use geometry::{Component, Direction, Position, Tile};
pub use solver::LayoutSolver;
pub use trail::Trail;
