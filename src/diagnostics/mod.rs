// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search diagnostics.
//!
//! The solver reports what it does through a [`SearchObserver`]. Observers
//! only watch: nothing they record feeds back into the search, so a solve
//! with [`NullObserver`] places exactly what a solve with a [`DecisionTree`]
//! places.

pub mod tree;

pub use tree::{DecisionTree, TreeNode};

use crate::engine::{PlacementOption, SolveFailure};
use crate::geometry::Position;
use tracing::{debug, info, trace};

/// Identifier of a decision-tree node, unique within one solve.
pub type NodeId = usize;

/// A placement decision as reported to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub component: String,
    pub position: Position,
    /// The constraint that produced this placement; `None` for the root and
    /// for orphans.
    pub constraint: Option<String>,
    pub depth: usize,
}

/// Receives structured search events. Every method defaults to doing nothing.
pub trait SearchObserver {
    fn node_created(&mut self, _node: &NodeInfo) {}

    /// `accepted` is false when the grid was already occupied.
    fn placement_tried(
        &mut self,
        _component: &str,
        _option: &PlacementOption,
        _accepted: bool,
        _depth: usize,
    ) {
    }

    fn constraint_resolved(&mut self, _node: NodeId, _constraint: &str) {}

    /// The subtree under `node` failed and its placement was rolled back.
    fn backtrack(&mut self, _node: NodeId, _failure: &SolveFailure) {}

    /// The search succeeded; `leaf` is the last node of the solution path.
    fn solved(&mut self, _leaf: NodeId) {}
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn node_created(&mut self, node: &NodeInfo) {
        debug!(
            node = node.id,
            parent = ?node.parent,
            component = %node.component,
            position = %node.position,
            constraint = node.constraint.as_deref().unwrap_or("-"),
            depth = node.depth,
            "node created"
        );
    }

    fn placement_tried(
        &mut self,
        component: &str,
        option: &PlacementOption,
        accepted: bool,
        depth: usize,
    ) {
        trace!(
            component,
            position = %option.position(),
            side = %option.candidate.side,
            score = option.score(),
            accepted,
            depth,
            "placement tried"
        );
    }

    fn constraint_resolved(&mut self, node: NodeId, constraint: &str) {
        trace!(node, constraint, "constraint resolved");
    }

    fn backtrack(&mut self, node: NodeId, failure: &SolveFailure) {
        debug!(node, %failure, "backtrack");
    }

    fn solved(&mut self, leaf: NodeId) {
        info!(leaf, "layout solved");
    }
}

/// Forwards every event to two observers.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: SearchObserver, B: SearchObserver> SearchObserver for Tee<A, B> {
    fn node_created(&mut self, node: &NodeInfo) {
        self.0.node_created(node);
        self.1.node_created(node);
    }

    fn placement_tried(
        &mut self,
        component: &str,
        option: &PlacementOption,
        accepted: bool,
        depth: usize,
    ) {
        self.0.placement_tried(component, option, accepted, depth);
        self.1.placement_tried(component, option, accepted, depth);
    }

    fn constraint_resolved(&mut self, node: NodeId, constraint: &str) {
        self.0.constraint_resolved(node, constraint);
        self.1.constraint_resolved(node, constraint);
    }

    fn backtrack(&mut self, node: NodeId, failure: &SolveFailure) {
        self.0.backtrack(node, failure);
        self.1.backtrack(node, failure);
    }

    fn solved(&mut self, leaf: NodeId) {
        self.0.solved(leaf);
        self.1.solved(leaf);
    }
}
