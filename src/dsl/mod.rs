// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Markdown layout descriptions.
//!
//! ````text
//! ## Components
//! - **Keep** - central tower
//! - **Gate** - entrance
//!
//! ## Constraints
//! - ADJACENT(Gate, Keep, s)
//!
//! ## Component Tiles
//! **Keep:**
//! ```
//! +----+
//! |    |
//! +----+
//! ```
//! **Gate:**
//! ```
//! +--+
//! ```
//! ````
//!
//! Only components with a tile take part in the layout; the `Components`
//! section is informational. Constraints may name components whose tiles
//! appear later in the file.

pub mod errors;
mod parser;

pub use errors::{DslError, Result};

use crate::config::SolverConfig;
use crate::constraints::ConstraintTag;
use crate::error::LayoutError;
use crate::geometry::{Direction, Tile};
use crate::solver::LayoutSolver;
use std::path::Path;
use tracing::{debug, warn};

/// A tile definition and the line its block starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSpec {
    pub name: String,
    pub tile: Tile,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSpec {
    pub tag: ConstraintTag,
    pub a: String,
    pub b: String,
    pub direction: Direction,
    pub line: usize,
}

/// Everything read from a layout description, not yet checked for
/// consistency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutSpec {
    /// Names listed under `Components`.
    pub declared: Vec<String>,
    pub tiles: Vec<TileSpec>,
    pub constraints: Vec<ConstraintSpec>,
}

pub fn parse_str(text: &str) -> Result<LayoutSpec> {
    let spec = parser::parse(text)?;
    debug!(
        declared = spec.declared.len(),
        tiles = spec.tiles.len(),
        constraints = spec.constraints.len(),
        "parsed layout description"
    );
    Ok(spec)
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<LayoutSpec> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DslError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text)
}

impl LayoutSpec {
    /// Build a solver holding every tile and constraint, in file order.
    pub fn into_solver(self, config: SolverConfig) -> Result<LayoutSolver> {
        for name in &self.declared {
            if !self.tiles.iter().any(|t| &t.name == name) {
                warn!(component = %name, "declared component has no tile, skipping");
            }
        }

        let mut solver = LayoutSolver::with_config(config);
        for TileSpec { name, tile, line } in self.tiles {
            solver
                .add_component(name, tile)
                .map_err(|source| DslError::Layout { line, source })?;
        }
        for c in self.constraints {
            solver
                .add_constraint(c.tag, &c.a, &c.b, c.direction)
                .map_err(|source| match source {
                    LayoutError::UnknownComponent(name) => DslError::UnknownComponent {
                        line: c.line,
                        name,
                    },
                    source => DslError::Layout {
                        line: c.line,
                        source,
                    },
                })?;
        }
        Ok(solver)
    }
}
