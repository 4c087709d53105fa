// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! One-stop layout API: build a problem, solve it, inspect the answer.

use crate::config::SolverConfig;
use crate::constraints::{ConstraintId, ConstraintRegistry, ConstraintTag};
use crate::context::{SearchContext, Violation};
use crate::diagnostics::{SearchObserver, TracingObserver};
use crate::engine::{SolveFailure, SolveReport, TreeSolver};
use crate::error::Result;
use crate::geometry::{Component, ComponentId, Direction, Position, Tile};
use crate::render;

/// A layout problem together with the registry and configuration that solve
/// it.
///
/// ```
/// use tile_layout::{ConstraintTag, Direction, LayoutSolver};
///
/// let mut solver = LayoutSolver::new();
/// solver.add_component_ascii("Hall", "+-----+\n|     |\n+-----+").unwrap();
/// solver.add_component_ascii("Porch", "+--+\n+--+").unwrap();
/// solver
///     .add_constraint(ConstraintTag::Adjacent, "Porch", "Hall", Direction::South)
///     .unwrap();
///
/// solver.solve().unwrap();
/// let hall = solver.find_component("Hall").unwrap().position.unwrap();
/// let porch = solver.find_component("Porch").unwrap().position.unwrap();
/// assert_eq!(porch.y, hall.y + 3);
/// assert!(solver.verify().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct LayoutSolver {
    ctx: SearchContext,
    registry: ConstraintRegistry,
    config: SolverConfig,
}

impl LayoutSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the constraint registry.
    pub fn with_registry(mut self, registry: ConstraintRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConstraintRegistry {
        &self.registry
    }

    pub fn context(&self) -> &SearchContext {
        &self.ctx
    }

    pub fn add_component(&mut self, name: impl Into<String>, tile: Tile) -> Result<ComponentId> {
        self.ctx.add_component(name, tile)
    }

    pub fn add_component_ascii(&mut self, name: impl Into<String>, art: &str) -> Result<ComponentId> {
        self.ctx.add_component_ascii(name, art)
    }

    pub fn add_constraint(
        &mut self,
        tag: ConstraintTag,
        a: &str,
        b: &str,
        direction: Direction,
    ) -> Result<ConstraintId> {
        self.ctx.add_constraint(tag, a, b, direction)
    }

    pub fn find_component(&self, name: &str) -> Option<&Component> {
        self.ctx.find_component(name)
    }

    pub fn components(&self) -> &[Component] {
        self.ctx.components()
    }

    /// Current position of `name`, if it exists and is placed.
    pub fn position_of(&self, name: &str) -> Option<Position> {
        self.find_component(name).and_then(|c| c.position)
    }

    /// Solve, logging search events through `tracing`.
    pub fn solve(&mut self) -> std::result::Result<SolveReport, SolveFailure> {
        self.solve_with(&mut TracingObserver)
    }

    /// Solve, reporting search events to `observer`.
    pub fn solve_with(
        &mut self,
        observer: &mut dyn SearchObserver,
    ) -> std::result::Result<SolveReport, SolveFailure> {
        TreeSolver::new(&self.registry, &self.config, observer).solve(&mut self.ctx)
    }

    pub fn verify(&self) -> Vec<Violation> {
        self.ctx.verify(&self.registry)
    }

    /// Shift the layout so its top-left corner is `(0, 0)`.
    pub fn normalize(&mut self) -> Position {
        self.ctx.normalize()
    }

    /// ASCII rendering of the placed components within the configured limits.
    pub fn render(&self) -> String {
        render::render_layout(&self.ctx, self.config.render)
    }
}
