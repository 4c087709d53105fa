// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Independent check of a finished layout.

use super::SearchContext;
use crate::constraints::ConstraintRegistry;
use crate::geometry::tiles_collide;
use serde::Serialize;
use std::fmt;

/// A reason a layout is not a valid solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    Unplaced { component: String },
    Overlap { a: String, b: String },
    Unsatisfied { constraint: String },
    UnknownKind { constraint: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Unplaced { component } => write!(f, "'{component}' is not placed"),
            Violation::Overlap { a, b } => write!(f, "'{a}' overlaps '{b}'"),
            Violation::Unsatisfied { constraint } => write!(f, "{constraint} does not hold"),
            Violation::UnknownKind { constraint } => {
                write!(f, "{constraint} has no registered implementation")
            }
        }
    }
}

impl SearchContext {
    /// Re-check the current positions from scratch: every component placed,
    /// no two filled cells shared, every constraint validated by its kind.
    ///
    /// An empty result means the layout is a solution.
    pub fn verify(&self, registry: &ConstraintRegistry) -> Vec<Violation> {
        let mut violations = Vec::new();
        let components = self.components();

        for c in components.iter().filter(|c| !c.is_placed()) {
            violations.push(Violation::Unplaced {
                component: c.name.clone(),
            });
        }

        for (i, a) in components.iter().enumerate() {
            let Some(pa) = a.position else { continue };
            for b in &components[i + 1..] {
                let Some(pb) = b.position else { continue };
                if tiles_collide(&a.tile, pa, &b.tile, pb) {
                    violations.push(Violation::Overlap {
                        a: a.name.clone(),
                        b: b.name.clone(),
                    });
                }
            }
        }

        for constraint in self.constraints() {
            let described = self.describe(constraint);
            match registry.get(constraint.tag) {
                None => violations.push(Violation::UnknownKind {
                    constraint: described,
                }),
                Some(kind) => {
                    let a = self.component(constraint.a);
                    let b = self.component(constraint.b);
                    if a.is_placed() && b.is_placed() && !kind.validate(constraint, a, b) {
                        violations.push(Violation::Unsatisfied {
                            constraint: described,
                        });
                    }
                }
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintTag;
    use crate::geometry::{Direction, Position, Tile};

    #[test]
    fn test_verify_reports_each_problem() {
        let mut ctx = SearchContext::new();
        ctx.add_component("A", Tile::solid(2, 2, 'a').unwrap())
            .unwrap();
        ctx.add_component("B", Tile::solid(2, 2, 'b').unwrap())
            .unwrap();
        ctx.add_component("C", Tile::solid(1, 1, 'c').unwrap())
            .unwrap();
        ctx.add_constraint(ConstraintTag::Adjacent, "A", "B", Direction::North)
            .unwrap();
        let registry = ConstraintRegistry::new();

        ctx.place(0, Position::new(0, 0));
        ctx.place(1, Position::new(5, 5));
        assert_eq!(
            ctx.verify(&registry),
            vec![
                Violation::Unplaced {
                    component: "C".into()
                },
                Violation::Unsatisfied {
                    constraint: "ADJACENT(A, B, north)".into()
                },
            ]
        );

        ctx.reset();
        ctx.place(0, Position::new(0, -2));
        ctx.place(1, Position::new(0, 0));
        ctx.place(2, Position::new(9, 9));
        assert!(ctx.verify(&registry).is_empty());

        assert_eq!(
            ctx.verify(&ConstraintRegistry::empty()),
            vec![Violation::UnknownKind {
                constraint: "ADJACENT(A, B, north)".into()
            }]
        );
    }

    #[test]
    fn test_verify_detects_overlap() {
        let mut ctx = SearchContext::new();
        ctx.add_component("A", Tile::solid(2, 2, 'a').unwrap())
            .unwrap();
        ctx.add_component("B", Tile::solid(2, 2, 'b').unwrap())
            .unwrap();
        ctx.place(0, Position::new(0, 0));
        ctx.place(1, Position::new(2, 0));
        assert!(ctx.verify(&ConstraintRegistry::new()).is_empty());

        // Bypass the grid to build an invalid layout.
        ctx.components[1].position = Some(Position::new(1, 1));
        assert_eq!(
            ctx.verify(&ConstraintRegistry::new()),
            vec![Violation::Overlap {
                a: "A".into(),
                b: "B".into()
            }]
        );
    }
}
