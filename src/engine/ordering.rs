// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Which component starts the search and which constraint grows it.

use crate::constraints::ConstraintId;
use crate::context::SearchContext;
use crate::geometry::ComponentId;
use std::cmp::Reverse;

/// Most constrained component first; ties go to the one that has failed
/// least often, then to the earliest added.
pub fn select_root(ctx: &SearchContext) -> Option<ComponentId> {
    ctx.components()
        .iter()
        .min_by_key(|c| (Reverse(ctx.degree(c.id)), c.failed_placements, c.id))
        .map(|c| c.id)
}

/// The first unresolved constraint, in insertion order, with exactly one
/// placed endpoint.
pub fn find_frontier(ctx: &SearchContext) -> Option<ConstraintId> {
    ctx.constraints()
        .iter()
        .filter(|c| !ctx.is_resolved(c.id))
        .find(|c| ctx.component(c.a).is_placed() != ctx.component(c.b).is_placed())
        .map(|c| c.id)
}

/// Unplaced components that some constraint mentions.
pub fn stranded(ctx: &SearchContext) -> Vec<ComponentId> {
    ctx.components()
        .iter()
        .filter(|c| !c.is_placed() && ctx.degree(c.id) > 0)
        .map(|c| c.id)
        .collect()
}

/// Unplaced components no constraint mentions, in insertion order.
pub fn orphans(ctx: &SearchContext) -> Vec<ComponentId> {
    ctx.components()
        .iter()
        .filter(|c| !c.is_placed() && ctx.degree(c.id) == 0)
        .map(|c| c.id)
        .collect()
}
