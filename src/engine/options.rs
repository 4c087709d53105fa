// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Placement options: scored candidates plus what they would collide with.

use crate::constraints::{Candidate, Constraint, ConstraintKind};
use crate::context::SearchContext;
use crate::geometry::{ComponentId, Position};
use serde::Serialize;
use std::cmp::Reverse;

/// Placed components a candidate would overlap, by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub components: Vec<ComponentId>,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.components.is_empty()
    }
}

/// One position the solver may try for the unplaced endpoint of a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementOption {
    pub candidate: Candidate,
    pub conflicts: ConflictReport,
}

impl PlacementOption {
    pub fn position(&self) -> Position {
        self.candidate.position
    }

    pub fn score(&self) -> i32 {
        self.candidate.score
    }

    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_clear()
    }
}

/// Candidates for `unplaced` under `constraint`, each with its conflict
/// report, in generation order.
pub fn generate_options(
    ctx: &SearchContext,
    kind: &dyn ConstraintKind,
    constraint: &Constraint,
    unplaced: ComponentId,
) -> Vec<PlacementOption> {
    let placed = ctx.component(constraint.other(unplaced));
    kind.generate_placements(constraint, ctx.component(unplaced), placed)
        .into_iter()
        .map(|candidate| PlacementOption {
            conflicts: ConflictReport {
                components: ctx.conflicts_at(unplaced, candidate.position),
            },
            candidate,
        })
        .collect()
}

/// Conflict-free options first, then by descending score. Stable, so ties
/// keep generation order.
pub fn order_options(options: &mut [PlacementOption]) {
    options.sort_by_key(|o| (!o.is_conflict_free(), Reverse(o.score())));
}
