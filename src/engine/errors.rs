// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Why a search branch (or the whole search) failed.

use crate::constraints::ConstraintTag;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumDiscriminants, EnumIter};
use thiserror::Error;

/// A failed branch or a failed search.
///
/// Recoverable failures make the solver try the next option of the parent
/// node. Fatal failures ([`SolveFailure::is_fatal`]) abort the whole search
/// because no other choice could change the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error, EnumDiscriminants)]
#[strum_discriminants(name(FailureKind), derive(EnumCountMacro, EnumIter, Display, Hash))]
pub enum SolveFailure {
    /// There is nothing to place.
    #[error("no components to place")]
    NoComponents,

    /// A constraint names a kind with no registered implementation.
    #[error("no implementation registered for constraint kind {tag}")]
    UnknownConstraintKind { tag: ConstraintTag },

    /// Components remain unplaced but no unresolved constraint links them to
    /// the placed set. Connectivity does not depend on positions, so
    /// backtracking cannot help.
    #[error("no constraint links the placed components to {unplaced:?}")]
    FrontierNotFound { unplaced: Vec<String> },

    /// The frontier constraint produced no candidate positions at all.
    #[error("{constraint} produced no placements for '{component}' at depth {depth}")]
    NoPlacementOptions {
        constraint: String,
        component: String,
        depth: usize,
    },

    /// A constraint whose endpoints were both placed does not hold.
    #[error("{constraint} does not hold at depth {depth}")]
    ConstraintViolated { constraint: String, depth: usize },

    /// Every option for a component was rejected or failed below.
    #[error("all {options} placements for '{component}' failed at depth {depth}")]
    Exhausted {
        component: String,
        options: usize,
        depth: usize,
    },

    /// The node budget ran out.
    #[error("iteration limit of {limit} exceeded")]
    IterationLimitExceeded { limit: u64 },
}

impl SolveFailure {
    /// True if the failure ends the search instead of the current branch.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SolveFailure::NoComponents
                | SolveFailure::UnknownConstraintKind { .. }
                | SolveFailure::FrontierNotFound { .. }
                | SolveFailure::IterationLimitExceeded { .. }
        )
    }

    pub fn kind(&self) -> FailureKind {
        FailureKind::from(self)
    }
}
