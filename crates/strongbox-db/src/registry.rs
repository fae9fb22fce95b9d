//! The label-keyed, most-specific-first ordering of leaf adapters.

use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
};

use tracing::debug;

use crate::{
    adapter::{BoxedAdapter, LeafAdapter},
    entity::HierarchyEntity,
    error::{DbError, Result},
};

/// Leaf adapters keyed by label, ordered so that every subtype comes before all of its
/// supertypes.
///
/// The order is derived from each adapter's declared supertype: adapters are sorted by
/// their distance from the root, deepest first, with ties broken by label. It does not
/// depend on the order adapters were supplied in. The registry is immutable once built.
pub struct AdapterRegistry<E: HierarchyEntity> {
    adapters: Vec<BoxedAdapter<E>>,
    depths: Vec<usize>,
    positions: HashMap<&'static str, usize>,
}

impl<E: HierarchyEntity> AdapterRegistry<E> {
    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// * [`DbError::EmptyRegistry`] if no adapters are given
    /// * [`DbError::DuplicateAdapterLabel`] if two adapters share a label
    /// * [`DbError::UnknownSupertype`] if an adapter extends an unregistered label
    /// * [`DbError::HierarchyCycle`] if supertypes loop
    /// * [`DbError::MultipleRoots`] if more than one adapter has no supertype
    pub fn new(adapters: Vec<BoxedAdapter<E>>) -> Result<Self> {
        if adapters.is_empty() {
            return Err(DbError::EmptyRegistry);
        }

        let mut supertypes: HashMap<&'static str, Option<&'static str>> = HashMap::new();
        for adapter in &adapters {
            if supertypes
                .insert(adapter.label(), adapter.supertype())
                .is_some()
            {
                return Err(DbError::DuplicateAdapterLabel(adapter.label().to_string()));
            }
        }

        for adapter in &adapters {
            if let Some(supertype) = adapter.supertype() {
                if !supertypes.contains_key(supertype) {
                    return Err(DbError::UnknownSupertype {
                        label: adapter.label().to_string(),
                        supertype: supertype.to_string(),
                    });
                }
            }
        }

        let mut depth_of = HashMap::with_capacity(adapters.len());
        for adapter in &adapters {
            let depth = depth_below_root(adapter.label(), &supertypes)?;
            depth_of.insert(adapter.label(), depth);
        }

        let mut roots: Vec<String> = adapters
            .iter()
            .filter(|adapter| adapter.supertype().is_none())
            .map(|adapter| adapter.label().to_string())
            .collect();
        if roots.len() > 1 {
            roots.sort();
            return Err(DbError::MultipleRoots(roots));
        }

        let mut adapters = adapters;
        adapters.sort_by_key(|adapter| (Reverse(depth_of[adapter.label()]), adapter.label()));

        let depths = adapters
            .iter()
            .map(|adapter| depth_of[adapter.label()])
            .collect();
        let positions = adapters
            .iter()
            .enumerate()
            .map(|(idx, adapter)| (adapter.label(), idx))
            .collect();

        let registry = Self {
            adapters,
            depths,
            positions,
        };
        debug!(
            "adapter registry order: {}",
            registry.labels().join(" > ")
        );
        Ok(registry)
    }

    /// The adapter of the least specific type.
    pub fn root(&self) -> &dyn LeafAdapter<E> {
        // Validated non-empty with exactly one root, which sorts last.
        self.adapters[self.adapters.len() - 1].as_ref()
    }

    pub fn get(&self, label: &str) -> Option<&dyn LeafAdapter<E>> {
        self.positions
            .get(label)
            .map(|&idx| self.adapters[idx].as_ref())
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Distance of `label` below the root type.
    pub fn depth(&self, label: &str) -> Option<usize> {
        self.position(label).map(|idx| self.depths[idx])
    }

    /// The first adapter, most specific first, that accepts `entity`.
    pub fn adapter_for(&self, entity: &E) -> Option<&dyn LeafAdapter<E>> {
        self.iter().find(|adapter| adapter.accepts(entity))
    }

    /// Adapters from the most specific type to the least specific one.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &dyn LeafAdapter<E>> {
        self.adapters.iter().map(|adapter| adapter.as_ref())
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|adapter| adapter.label()).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

fn depth_below_root(
    label: &'static str,
    supertypes: &HashMap<&'static str, Option<&'static str>>,
) -> Result<usize> {
    let mut seen = HashSet::new();
    let mut current = label;
    let mut depth = 0;

    while let Some(Some(supertype)) = supertypes.get(current) {
        if !seen.insert(current) {
            return Err(DbError::HierarchyCycle(current.to_string()));
        }
        current = supertype;
        depth += 1;
    }

    Ok(depth)
}
