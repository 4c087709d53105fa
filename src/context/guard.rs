// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Scoped trial placement.

use super::SearchContext;
use std::ops::{Deref, DerefMut};

/// A checkpoint on a [`SearchContext`] that rewinds when dropped.
///
/// Every exit path out of a trial (failure, `?`, panic unwinding) undoes the
/// trial's changes unless [`TrialGuard::commit`] was called first.
#[derive(Debug)]
pub struct TrialGuard<'a> {
    ctx: &'a mut SearchContext,
    committed: bool,
}

impl<'a> TrialGuard<'a> {
    pub fn new(ctx: &'a mut SearchContext) -> Self {
        ctx.checkpoint();
        Self {
            ctx,
            committed: false,
        }
    }

    /// Keep the trial's changes.
    pub fn commit(mut self) {
        self.committed = true;
        self.ctx.commit();
    }
}

impl Deref for TrialGuard<'_> {
    type Target = SearchContext;

    fn deref(&self) -> &SearchContext {
        self.ctx
    }
}

impl DerefMut for TrialGuard<'_> {
    fn deref_mut(&mut self) -> &mut SearchContext {
        self.ctx
    }
}

impl Drop for TrialGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.ctx.rewind();
        }
    }
}
