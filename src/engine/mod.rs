// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Depth-first backtracking layout search.
//!
//! The solver grows a layout one component at a time:
//!
//! 1. Place the root (see [`ordering::select_root`]) at the configured anchor.
//! 2. Pick the frontier: the first unresolved constraint with exactly one
//!    placed endpoint. No frontier and nothing constrained left to place
//!    means success.
//! 3. Ask the constraint's kind for candidate positions and order them.
//! 4. For each candidate whose cells are free: place it inside a
//!    [`TrialGuard`], validate every constraint the placement closed, and
//!    recurse. Success propagates up at once; failure drops the guard, which
//!    rolls the trial back exactly, and the next candidate is tried.
//! 5. When every candidate fails the node is exhausted and its parent moves
//!    on.
//!
//! Unconstrained components are placed after the search succeeds, to the
//! east of the layout.

pub mod errors;
pub mod options;
pub mod ordering;

pub use errors::{FailureKind, SolveFailure};
pub use options::{ConflictReport, PlacementOption};

use crate::config::SolverConfig;
use crate::constraints::{ConstraintKind, ConstraintRegistry, ConstraintTag};
use crate::context::{SearchContext, TrialGuard};
use crate::diagnostics::{NodeId, NodeInfo, SearchObserver};
use crate::geometry::{ComponentId, Position};
use crate::state::{Counters, StatisticsSummary};
use serde::Serialize;
use tracing::{debug, info};

/// Where one component ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub component: String,
    pub position: Position,
}

/// Outcome of a successful solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    /// Every component, in insertion order.
    pub placements: Vec<Placement>,
    pub iterations: u64,
    pub nodes_created: u64,
    pub backtracks: u64,
    pub statistics: StatisticsSummary,
}

impl SolveReport {
    fn from_context(ctx: &SearchContext, iterations: u64) -> Self {
        Self {
            placements: ctx
                .components()
                .iter()
                .filter_map(|c| {
                    c.position.map(|position| Placement {
                        component: c.name.clone(),
                        position,
                    })
                })
                .collect(),
            iterations,
            nodes_created: ctx.statistics.get(Counters::NodesCreated),
            backtracks: ctx.statistics.get(Counters::Backtracks),
            statistics: ctx.statistics.summary(),
        }
    }

    pub fn position_of(&self, component: &str) -> Option<Position> {
        self.placements
            .iter()
            .find(|p| p.component == component)
            .map(|p| p.position)
    }
}

/// One run of the search over a [`SearchContext`].
///
/// The solver is consumed by [`TreeSolver::solve`]; build a new one per solve.
pub struct TreeSolver<'a> {
    registry: &'a ConstraintRegistry,
    config: &'a SolverConfig,
    observer: &'a mut dyn SearchObserver,
    iterations: u64,
    next_node: NodeId,
}

impl<'a> TreeSolver<'a> {
    pub fn new(
        registry: &'a ConstraintRegistry,
        config: &'a SolverConfig,
        observer: &'a mut dyn SearchObserver,
    ) -> Self {
        Self {
            registry,
            config,
            observer,
            iterations: 0,
            next_node: 0,
        }
    }

    /// Search for a layout satisfying every constraint in `ctx`.
    ///
    /// Any previous placements are discarded first. On success every
    /// component in `ctx` has a position; on failure none has.
    pub fn solve(mut self, ctx: &mut SearchContext) -> Result<SolveReport, SolveFailure> {
        ctx.reset();
        ctx.statistics.reset();
        info!(
            components = ctx.components().len(),
            constraints = ctx.constraints().len(),
            max_iterations = self.config.max_iterations,
            "solving layout"
        );

        match self.run(ctx) {
            Ok(leaf) => {
                self.observer.solved(leaf);
                let report = SolveReport::from_context(ctx, self.iterations);
                info!(
                    iterations = report.iterations,
                    nodes = report.nodes_created,
                    backtracks = report.backtracks,
                    "layout solved"
                );
                Ok(report)
            }
            Err(failure) => {
                ctx.statistics.record_failure(&failure);
                info!(%failure, iterations = self.iterations, "layout search failed");
                ctx.reset();
                Err(failure)
            }
        }
    }

    fn run(&mut self, ctx: &mut SearchContext) -> Result<NodeId, SolveFailure> {
        if let Some(c) = ctx
            .constraints()
            .iter()
            .find(|c| !self.registry.contains(c.tag))
        {
            return Err(SolveFailure::UnknownConstraintKind { tag: c.tag });
        }
        let root = ordering::select_root(ctx).ok_or(SolveFailure::NoComponents)?;
        ctx.place(root, self.config.anchor);
        let root_node = self.create_node(ctx, None, root, None, 0);

        let leaf = self.advance(ctx, root_node, 0)?;
        Ok(self.place_orphans(ctx, leaf))
    }

    fn kind(&self, tag: ConstraintTag) -> Result<&'a dyn ConstraintKind, SolveFailure> {
        let registry = self.registry;
        registry
            .get(tag)
            .ok_or(SolveFailure::UnknownConstraintKind { tag })
    }

    fn create_node(
        &mut self,
        ctx: &mut SearchContext,
        parent: Option<NodeId>,
        component: ComponentId,
        constraint: Option<String>,
        depth: usize,
    ) -> NodeId {
        let id = self.next_node;
        self.next_node += 1;
        ctx.statistics.increment(Counters::NodesCreated);
        let c = ctx.component(component);
        self.observer.node_created(&NodeInfo {
            id,
            parent,
            component: c.name.clone(),
            position: c.position.unwrap_or_default(),
            constraint,
            depth,
        });
        id
    }

    /// Grow the layout from `node` until complete. Returns the solution leaf.
    fn advance(
        &mut self,
        ctx: &mut SearchContext,
        node: NodeId,
        depth: usize,
    ) -> Result<NodeId, SolveFailure> {
        self.iterations += 1;
        if self.iterations > self.config.max_iterations {
            return Err(SolveFailure::IterationLimitExceeded {
                limit: self.config.max_iterations,
            });
        }

        let Some(frontier) = ordering::find_frontier(ctx) else {
            let stranded = ordering::stranded(ctx);
            if stranded.is_empty() {
                return Ok(node);
            }
            return Err(SolveFailure::FrontierNotFound {
                unplaced: stranded
                    .into_iter()
                    .map(|id| ctx.component(id).name.clone())
                    .collect(),
            });
        };

        let constraint = *ctx.constraint(frontier);
        let kind = self.kind(constraint.tag)?;
        let unplaced = if ctx.component(constraint.a).is_placed() {
            constraint.b
        } else {
            constraint.a
        };
        let name = ctx.component(unplaced).name.clone();
        let described = ctx.describe(&constraint);

        let mut options = options::generate_options(ctx, kind, &constraint, unplaced);
        if options.is_empty() {
            return Err(SolveFailure::NoPlacementOptions {
                constraint: described,
                component: name,
                depth,
            });
        }
        options::order_options(&mut options);
        debug!(
            constraint = %described,
            component = %name,
            options = options.len(),
            depth,
            "expanding frontier"
        );

        for option in &options {
            ctx.statistics.increment(Counters::PlacementsTried);
            let at = option.position();
            if ctx.is_occupied(unplaced, at) {
                ctx.statistics.increment(Counters::PlacementsOccupied);
                self.observer.placement_tried(&name, option, false, depth);
                continue;
            }
            self.observer.placement_tried(&name, option, true, depth);

            let mut trial = TrialGuard::new(ctx);
            trial.place(unplaced, at);
            let child = self.create_node(
                &mut trial,
                Some(node),
                unplaced,
                Some(described.clone()),
                depth + 1,
            );
            match self.enter(&mut trial, child, depth + 1) {
                Ok(leaf) => {
                    trial.commit();
                    return Ok(leaf);
                }
                Err(failure) if failure.is_fatal() => return Err(failure),
                Err(failure) => {
                    trial.statistics.increment(Counters::Backtracks);
                    trial.statistics.record_failure(&failure);
                    self.observer.backtrack(child, &failure);
                    debug!(component = %name, %at, %failure, depth, "backtracking");
                }
            }
        }

        ctx.record_failed_placement(unplaced);
        Err(SolveFailure::Exhausted {
            component: name,
            options: options.len(),
            depth,
        })
    }

    /// Validate every constraint the latest placement closed, then continue.
    fn enter(
        &mut self,
        ctx: &mut SearchContext,
        node: NodeId,
        depth: usize,
    ) -> Result<NodeId, SolveFailure> {
        for id in ctx.closed_constraints() {
            let constraint = *ctx.constraint(id);
            let kind = self.kind(constraint.tag)?;
            let a = ctx.component(constraint.a);
            let b = ctx.component(constraint.b);
            if !kind.validate(&constraint, a, b) {
                return Err(SolveFailure::ConstraintViolated {
                    constraint: ctx.describe(&constraint),
                    depth,
                });
            }
            ctx.resolve(id);
            ctx.statistics.increment(Counters::ConstraintsResolved);
            self.observer
                .constraint_resolved(node, &ctx.describe(&constraint));
        }
        self.advance(ctx, node, depth)
    }

    /// Put every unconstrained component east of the layout, top-aligned.
    fn place_orphans(&mut self, ctx: &mut SearchContext, mut leaf: NodeId) -> NodeId {
        for id in ordering::orphans(ctx) {
            let bounds = ctx.layout_bounds();
            let at = Position::new(bounds.right() + self.config.orphan_gap, bounds.y);
            ctx.place(id, at);
            ctx.statistics.increment(Counters::OrphansPlaced);
            debug!(component = %ctx.component(id).name, %at, "placed orphan");
            let depth = ctx.placed_count() - 1;
            leaf = self.create_node(ctx, Some(leaf), id, None, depth);
        }
        leaf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullObserver;
    use crate::geometry::{Direction, Tile};

    fn solve(ctx: &mut SearchContext, config: &SolverConfig) -> Result<SolveReport, SolveFailure> {
        let registry = ConstraintRegistry::new();
        let mut observer = NullObserver;
        TreeSolver::new(&registry, config, &mut observer).solve(ctx)
    }

    fn rooms() -> SearchContext {
        let mut ctx = SearchContext::new();
        ctx.add_component("RoomA", Tile::outline(7, 5).unwrap())
            .unwrap();
        ctx.add_component("RoomB", Tile::outline(4, 3).unwrap())
            .unwrap();
        ctx
    }

    #[test]
    fn test_single_component_is_root() {
        let mut ctx = SearchContext::new();
        ctx.add_component("Solo", Tile::solid(2, 2, '#').unwrap())
            .unwrap();
        let config = SolverConfig::default().with_anchor(Position::new(5, 6));
        let report = solve(&mut ctx, &config).unwrap();
        assert_eq!(report.position_of("Solo"), Some(Position::new(5, 6)));
        assert_eq!(report.iterations, 1);
        assert_eq!(report.nodes_created, 1);
    }

    #[test]
    fn test_no_components() {
        let mut ctx = SearchContext::new();
        assert_eq!(
            solve(&mut ctx, &SolverConfig::default()),
            Err(SolveFailure::NoComponents)
        );
    }

    #[test]
    fn test_first_best_candidate_wins() {
        let mut ctx = rooms();
        ctx.add_constraint(ConstraintTag::Adjacent, "RoomB", "RoomA", Direction::North)
            .unwrap();
        let report = solve(&mut ctx, &SolverConfig::default()).unwrap();
        // RoomA has the same degree and was added first.
        assert_eq!(report.position_of("RoomA"), Some(Position::new(0, 0)));
        assert_eq!(report.position_of("RoomB"), Some(Position::new(0, -3)));
        assert_eq!(report.backtracks, 0);
        assert_eq!(report.iterations, 2);
    }

    #[test]
    fn test_unknown_kind_is_fatal_before_placing() {
        let mut ctx = rooms();
        ctx.add_constraint(ConstraintTag::Adjacent, "RoomB", "RoomA", Direction::Any)
            .unwrap();
        let registry = ConstraintRegistry::empty();
        let config = SolverConfig::default();
        let mut observer = NullObserver;
        let result = TreeSolver::new(&registry, &config, &mut observer).solve(&mut ctx);
        assert_eq!(
            result,
            Err(SolveFailure::UnknownConstraintKind {
                tag: ConstraintTag::Adjacent
            })
        );
        assert_eq!(ctx.placed_count(), 0);
    }

    #[test]
    fn test_iteration_limit() {
        let mut ctx = rooms();
        ctx.add_constraint(ConstraintTag::Adjacent, "RoomB", "RoomA", Direction::North)
            .unwrap();
        let config = SolverConfig::default().with_max_iterations(1);
        assert_eq!(
            solve(&mut ctx, &config),
            Err(SolveFailure::IterationLimitExceeded { limit: 1 })
        );
        assert_eq!(ctx.placed_count(), 0);
        assert_eq!(ctx.statistics.failures(FailureKind::IterationLimitExceeded), 1);
    }
}
