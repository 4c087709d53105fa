// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context: the layout problem plus its mutable search state.
//!
//! The SearchContext owns:
//! - the components and constraints, fixed once the problem is built
//! - the grid, component positions and resolved-constraint flags, which the
//!   search mutates
//! - the trail recording those mutations so they can be undone exactly
//!
//! All search mutations go through [`SearchContext::place`] and
//! [`SearchContext::resolve`], which record on the trail. Everything a trial
//! placement changes is therefore undone by [`SearchContext::rewind`], or
//! automatically by dropping a [`TrialGuard`].

pub mod guard;
pub mod verify;

pub use guard::TrialGuard;
pub use verify::Violation;

use crate::constraints::{Constraint, ConstraintId, ConstraintTag};
use crate::error::{LayoutError, Result};
use crate::geometry::{tiles_collide, Component, ComponentId, Direction, Position, Rect, Tile};
use crate::grid::Grid;
use crate::state::Statistics;
use crate::trail::{Trail, TrailEntry};
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Default)]
pub struct SearchContext {
    components: Vec<Component>,
    constraints: Vec<Constraint>,
    names: HashMap<String, ComponentId>,
    /// `resolved[c]` is true once constraint `c` has been validated.
    resolved: Vec<bool>,
    grid: Grid,
    /// Trail for exact rollback of trial placements
    pub trail: Trail,
    /// Counters for the most recent solve
    pub statistics: Statistics,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. Names must be unique.
    pub fn add_component(&mut self, name: impl Into<String>, tile: Tile) -> Result<ComponentId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(LayoutError::DuplicateComponent(name));
        }
        let id = self.components.len();
        self.names.insert(name.clone(), id);
        self.components.push(Component::new(id, name, tile));
        Ok(id)
    }

    /// Add a component whose tile is given as ASCII art.
    pub fn add_component_ascii(&mut self, name: impl Into<String>, art: &str) -> Result<ComponentId> {
        let name = name.into();
        match Tile::from_ascii(art) {
            Some(tile) => self.add_component(name, tile),
            None => Err(LayoutError::EmptyTile { name }),
        }
    }

    /// Add `tag(a, b, direction)` between two existing components.
    pub fn add_constraint(
        &mut self,
        tag: ConstraintTag,
        a: &str,
        b: &str,
        direction: Direction,
    ) -> Result<ConstraintId> {
        let a_id = self.require(a)?;
        let b_id = self.require(b)?;
        if a_id == b_id {
            return Err(LayoutError::SelfConstraint(a.to_string()));
        }
        let id = self.constraints.len();
        self.constraints.push(Constraint {
            id,
            tag,
            a: a_id,
            b: b_id,
            direction,
        });
        self.resolved.push(false);
        Ok(id)
    }

    fn require(&self, name: &str) -> Result<ComponentId> {
        self.component_id(name)
            .ok_or_else(|| LayoutError::UnknownComponent(name.to_string()))
    }

    pub fn component_id(&self, name: &str) -> Option<ComponentId> {
        self.names.get(name).copied()
    }

    pub fn find_component(&self, name: &str) -> Option<&Component> {
        self.component_id(name).map(|id| &self.components[id])
    }

    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id]
    }

    /// Components in insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id]
    }

    /// Constraints in insertion order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_resolved(&self, id: ConstraintId) -> bool {
        self.resolved[id]
    }

    /// Number of constraints mentioning `id`.
    pub fn degree(&self, id: ComponentId) -> usize {
        self.constraints.iter().filter(|c| c.involves(id)).count()
    }

    pub fn placed_count(&self) -> usize {
        self.components.iter().filter(|c| c.is_placed()).count()
    }

    /// True once every component has a position.
    pub fn is_complete(&self) -> bool {
        self.components.iter().all(Component::is_placed)
    }

    /// `ADJACENT(Hall, Kitchen, north)`
    pub fn describe(&self, constraint: &Constraint) -> String {
        format!(
            "{}({}, {}, {})",
            constraint.tag,
            self.components[constraint.a].name,
            self.components[constraint.b].name,
            constraint.direction
        )
    }

    /// Placed components whose filled cells would collide with `id` at `at`.
    pub fn conflicts_at(&self, id: ComponentId, at: Position) -> Vec<ComponentId> {
        let tile = &self.components[id].tile;
        self.components
            .iter()
            .filter(|other| other.id != id)
            .filter_map(|other| other.position.map(|p| (other, p)))
            .filter(|(other, p)| tiles_collide(tile, at, &other.tile, *p))
            .map(|(other, _)| other.id)
            .collect()
    }

    /// True if any filled cell of `id` at `at` would land on an occupied grid
    /// cell. Grows the grid to cover the candidate.
    pub fn is_occupied(&mut self, id: ComponentId, at: Position) -> bool {
        self.grid
            .occupied_after_expand(&self.components[id].tile, at)
    }

    /// Bounding box of every placed component.
    pub fn layout_bounds(&self) -> Rect {
        self.components
            .iter()
            .filter_map(Component::rect)
            .fold(Rect::default(), |acc, r| acc.union(&r))
    }

    /// Write `id` into the grid at `at`, recording the change on the trail.
    pub fn place(&mut self, id: ComponentId, at: Position) {
        let component = &mut self.components[id];
        debug_assert!(component.position.is_none(), "{} placed twice", component.name);
        trace!(component = %component.name, %at, "place");
        self.grid.write(&component.tile, at);
        component.position = Some(at);
        self.trail.record(TrailEntry::Placed { component: id, at });
    }

    /// Mark constraint `id` as validated, recording the change on the trail.
    pub fn resolve(&mut self, id: ConstraintId) {
        debug_assert!(!self.resolved[id]);
        self.resolved[id] = true;
        self.trail.record(TrailEntry::Resolved { constraint: id });
    }

    /// Unresolved constraints with both endpoints placed, in insertion order.
    pub fn closed_constraints(&self) -> Vec<ConstraintId> {
        self.constraints
            .iter()
            .filter(|c| !self.resolved[c.id])
            .filter(|c| self.components[c.a].is_placed() && self.components[c.b].is_placed())
            .map(|c| c.id)
            .collect()
    }

    pub fn checkpoint(&mut self) -> usize {
        self.trail.checkpoint()
    }

    /// Undo everything since the most recent checkpoint.
    ///
    /// Returns false if there was no checkpoint. Grid growth is not undone;
    /// only cell contents are.
    pub fn rewind(&mut self) -> bool {
        let Some(undone) = self.trail.rewind() else {
            return false;
        };
        for entry in undone {
            match entry {
                TrailEntry::Placed { component, at } => {
                    let c = &mut self.components[component];
                    trace!(component = %c.name, %at, "unplace");
                    self.grid.erase(&c.tile, at);
                    c.position = None;
                }
                TrailEntry::Resolved { constraint } => {
                    self.resolved[constraint] = false;
                }
            }
        }
        true
    }

    /// Keep everything since the most recent checkpoint.
    pub fn commit(&mut self) -> bool {
        self.trail.commit()
    }

    pub(crate) fn record_failed_placement(&mut self, id: ComponentId) {
        self.components[id].failed_placements += 1;
    }

    /// Forget every placement and resolution. `failed_placements` is kept.
    pub fn reset(&mut self) {
        for component in &mut self.components {
            component.position = None;
        }
        self.resolved.fill(false);
        self.trail.clear();
        self.grid = Grid::new();
    }

    /// Translate the layout so that its bounding box starts at `(0, 0)`.
    ///
    /// Returns the offset applied. The grid is rebuilt and the trail cleared,
    /// since recorded positions no longer match.
    pub fn normalize(&mut self) -> Position {
        let bounds = self.layout_bounds();
        if bounds.is_empty() || (bounds.x == 0 && bounds.y == 0) {
            return Position::default();
        }
        let offset = Position::new(-bounds.x, -bounds.y);
        self.grid = Grid::new();
        for component in &mut self.components {
            if let Some(p) = component.position {
                let moved = p.offset(offset.x, offset.y);
                self.grid.write(&component.tile, moved);
                component.position = Some(moved);
            }
        }
        self.trail.clear();
        offset
    }
}
