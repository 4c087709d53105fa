// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are stored in the context and incremented by the solver as it
//! walks the decision tree. Failures are counted per [`FailureKind`] after the
//! plain counters.

use crate::engine::{FailureKind, SolveFailure};
use serde::Serialize;
use std::collections::BTreeMap;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

#[derive(EnumCountMacro, EnumIter, Display, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Decision tree nodes, including the root and orphans.
    NodesCreated,
    /// Placement options the solver attempted (occupied ones included).
    PlacementsTried,
    /// Options skipped because the grid was already occupied.
    PlacementsOccupied,
    /// Trial placements that were rolled back.
    Backtracks,
    /// Constraints validated after both endpoints were placed.
    ConstraintsResolved,
    /// Components placed after the search because nothing constrains them.
    OrphansPlaced,
}

const COUNT: usize = Counters::COUNT + FailureKind::COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Default for Statistics {
    fn default() -> Self {
        Self { stats: [0; COUNT] }
    }
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Count one occurrence of `failure`.
    pub fn record_failure(&mut self, failure: &SolveFailure) {
        let kind = FailureKind::from(failure);
        self.stats[Counters::COUNT + kind as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// How many failures of `kind` have been recorded.
    pub fn failures(&self, kind: FailureKind) -> u64 {
        self.stats[Counters::COUNT + kind as usize]
    }

    pub fn reset(&mut self) {
        self.stats = [0; COUNT];
    }

    /// Every non-zero counter and failure count by name, for reports.
    pub fn summary(&self) -> StatisticsSummary {
        let counters = Counters::iter()
            .map(|c| (c.to_string(), self.get(c)))
            .filter(|(_, v)| *v > 0)
            .collect();
        let failures = FailureKind::iter()
            .map(|k| (k.to_string(), self.failures(k)))
            .filter(|(_, v)| *v > 0)
            .collect();
        StatisticsSummary { counters, failures }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsSummary {
    pub counters: BTreeMap<String, u64>,
    pub failures: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_failures_are_separate() {
        let mut stats = Statistics::new();
        stats.increment(Counters::Backtracks);
        stats.increment(Counters::Backtracks);
        stats.record_failure(&SolveFailure::NoComponents);

        assert_eq!(stats.get(Counters::Backtracks), 2);
        assert_eq!(stats.get(Counters::NodesCreated), 0);
        assert_eq!(stats.failures(FailureKind::NoComponents), 1);
        assert_eq!(stats.failures(FailureKind::Exhausted), 0);

        let summary = stats.summary();
        assert_eq!(summary.counters.get("Backtracks"), Some(&2));
        assert_eq!(summary.failures.get("NoComponents"), Some(&1));
        assert_eq!(summary.counters.len(), 1);

        stats.reset();
        assert_eq!(stats, Statistics::new());
    }
}
