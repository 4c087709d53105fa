// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for the layout search.
//!
//! Every mutation the search makes to a [`crate::context::SearchContext`]
//! (placing a component, resolving a constraint) is recorded here. Rewinding
//! to a checkpoint hands back the entries made since, newest first, so the
//! context can undo them in reverse order and land on exactly the state it
//! had when the checkpoint was taken.

use crate::constraints::ConstraintId;
use crate::geometry::{ComponentId, Position};

/// A single undoable change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailEntry {
    /// A component was written to the grid at `at`.
    Placed { component: ComponentId, at: Position },
    /// A constraint was validated and removed from the remaining set.
    Resolved { constraint: ConstraintId },
}

/// The trail of changes since the search began.
#[derive(Debug, Default)]
pub struct Trail {
    /// All trail entries recorded so far
    entries: Vec<TrailEntry>,
    /// Stack of checkpoint indices for nested backtracking
    checkpoints: Vec<usize>,
}

impl Trail {
    /// Create a new empty trail.
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(64),
            checkpoints: Vec::with_capacity(16),
        }
    }

    /// Record a checkpoint for later backtracking.
    ///
    /// Returns the checkpoint index.
    pub fn checkpoint(&mut self) -> usize {
        let checkpoint = self.entries.len();
        self.checkpoints.push(checkpoint);
        checkpoint
    }

    /// Record a change.
    pub fn record(&mut self, entry: TrailEntry) {
        self.entries.push(entry);
    }

    /// Pop the most recent checkpoint and return the entries made since it,
    /// newest first.
    ///
    /// Returns `None` if there is no checkpoint.
    pub fn rewind(&mut self) -> Option<Vec<TrailEntry>> {
        let checkpoint = self.checkpoints.pop()?;
        let mut undone = self.entries.split_off(checkpoint);
        undone.reverse();
        Some(undone)
    }

    /// Drop the most recent checkpoint, keeping its entries.
    ///
    /// The changes become part of the enclosing checkpoint, so an outer
    /// rewind still undoes them.
    pub fn commit(&mut self) -> bool {
        self.checkpoints.pop().is_some()
    }

    /// Forget every entry and checkpoint.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.checkpoints.clear();
    }

    /// Get the current number of entries in the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of active checkpoints.
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// Entries since the most recent checkpoint, oldest first.
    pub fn entries_since_checkpoint(&self) -> &[TrailEntry] {
        let start = self.checkpoints.last().copied().unwrap_or(0);
        &self.entries[start..]
    }
}
