// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Lookup table from [`ConstraintTag`] to its implementation.

use super::{Adjacent, ConstraintKind, ConstraintTag};
use std::collections::HashMap;
use tracing::debug;

/// Maps constraint tags to the kinds that implement them.
///
/// The default registry knows every built-in kind. [`ConstraintRegistry::empty`]
/// exists so that tests and embedders can start from nothing.
#[derive(Debug)]
pub struct ConstraintRegistry {
    kinds: HashMap<ConstraintTag, Box<dyn ConstraintKind>>,
}

impl ConstraintRegistry {
    /// A registry with every built-in kind.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(Adjacent));
        registry
    }

    /// A registry with no kinds at all.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Install `kind` under its own tag, returning any kind it replaces.
    pub fn register(&mut self, kind: Box<dyn ConstraintKind>) -> Option<Box<dyn ConstraintKind>> {
        let tag = kind.tag();
        debug!(%tag, kind = kind.name(), "registering constraint kind");
        self.kinds.insert(tag, kind)
    }

    pub fn get(&self, tag: ConstraintTag) -> Option<&dyn ConstraintKind> {
        self.kinds.get(&tag).map(Box::as_ref)
    }

    pub fn contains(&self, tag: ConstraintTag) -> bool {
        self.kinds.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for ConstraintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_registry_covers_every_tag() {
        let registry = ConstraintRegistry::default();
        for tag in ConstraintTag::iter() {
            assert!(registry.contains(tag), "missing {tag}");
            assert_eq!(registry.get(tag).unwrap().tag(), tag);
        }
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = ConstraintRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.get(ConstraintTag::Adjacent).is_none());

        assert!(registry.register(Box::new(Adjacent)).is_none());
        assert!(registry.register(Box::new(Adjacent)).is_some());
        assert_eq!(registry.len(), 1);
    }
}
