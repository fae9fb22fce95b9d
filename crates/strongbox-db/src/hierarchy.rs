//! Whole-chain reads and writes over a registry of leaf adapters.

use std::sync::Arc;

use strongbox_graph::{
    GraphError, Mutation, PlanExecutor, Projection, Traversal, Upward, Vertex, VertexId,
};
use tracing::debug;

use crate::{
    adapter::LeafAdapter,
    entity::{Hierarchy, HierarchyEntity},
    error::{DbError, Result},
    link::link,
    plan::{fold_plan, unfold_plan},
    registry::AdapterRegistry,
};

/// Maps an entity type hierarchy onto chains of vertices joined by `Extends` edges.
///
/// The read plan is built once, at construction, and shared by every fold. The adapter
/// holds no mutable state, so one instance serves any number of concurrent calls.
pub struct EntityUpwardHierarchyAdapter<E: HierarchyEntity> {
    registry: AdapterRegistry<E>,
    max_depth: usize,
    fold_plan: Arc<Traversal>,
}

impl<E: HierarchyEntity> EntityUpwardHierarchyAdapter<E> {
    pub fn new(registry: AdapterRegistry<E>, max_depth: usize) -> Self {
        let fold_plan = fold_plan(&registry, max_depth);
        debug!(
            "built fold plan for `{}`: depth {}, {} nodes",
            registry.root().label(),
            max_depth,
            fold_plan.node_count()
        );
        Self {
            registry,
            max_depth,
            fold_plan,
        }
    }

    pub fn registry(&self) -> &AdapterRegistry<E> {
        &self.registry
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Label of the hierarchy root; every stored chain starts at a vertex with it.
    pub fn root_label(&self) -> &'static str {
        self.registry.root().label()
    }

    /// The read plan materialising a vertex and its ancestors.
    pub fn fold(&self) -> FoldTraversal<'_, E> {
        FoldTraversal {
            registry: &self.registry,
            plan: self.fold_plan.clone(),
        }
    }

    /// The write plan persisting the leaf of `hierarchy` and all of its ancestors.
    pub fn unfold<'h>(&self, hierarchy: &'h Hierarchy<E>) -> Result<UnfoldTraversal<'h, E>> {
        self.unfold_at(hierarchy, hierarchy.leaf_index())
    }

    /// The write plan persisting node `index` of `hierarchy` and all of its ancestors.
    ///
    /// Levels are composed root first, so every `Extends` edge points at a parent the
    /// plan has already placed. Running the plan again against a stored chain only
    /// updates properties.
    ///
    /// # Errors
    ///
    /// Nothing is planned if validation fails:
    ///
    /// * [`DbError::UnknownNode`] if `index` is out of range
    /// * [`DbError::InvalidHierarchyRoot`] if the topmost ancestor is not of the root type
    /// * [`DbError::UnregisteredEntity`] if a level has no adapter
    /// * [`DbError::HierarchyGap`] if a level's parent is not its immediate supertype
    pub fn unfold_at<'h>(
        &self,
        hierarchy: &'h Hierarchy<E>,
        index: usize,
    ) -> Result<UnfoldTraversal<'h, E>> {
        let entity = hierarchy.get(index).ok_or(DbError::UnknownNode(index))?;

        let mut chain: Vec<&E> = hierarchy
            .lineage(index)
            .filter_map(|idx| hierarchy.get(idx))
            .collect();
        chain.reverse();

        let root_adapter = self.registry.root();
        let top = chain[0];
        if !root_adapter.accepts(top) {
            return Err(DbError::InvalidHierarchyRoot {
                found: top.kind().to_string(),
                expected: root_adapter.declared_type().to_string(),
            });
        }

        let mut levels: Vec<(&dyn LeafAdapter<E>, &E)> = Vec::with_capacity(chain.len());
        for entity in chain {
            let adapter = self
                .registry
                .adapter_for(entity)
                .ok_or_else(|| DbError::UnregisteredEntity(entity.kind().to_string()))?;

            let parent = levels.last().map(|(parent, _)| parent.label());
            if parent.is_some() && adapter.supertype() != parent {
                return Err(DbError::HierarchyGap {
                    child: adapter.label().to_string(),
                    expected: adapter.supertype().map(str::to_string),
                    found: parent.map(str::to_string),
                });
            }
            levels.push((adapter, entity));
        }

        let mut writes = levels
            .iter()
            .map(|(adapter, entity)| adapter.unfold(entity))
            .collect::<Result<Vec<_>>>()?
            .into_iter();
        let root = writes.next().ok_or(DbError::UnknownNode(index))?;
        let plan = unfold_plan(root, writes);

        debug!(
            "unfold `{}` ({}): {} levels",
            entity.kind(),
            entity.uuid(),
            levels.len()
        );

        Ok(UnfoldTraversal {
            label: root_adapter.label(),
            entity,
            plan,
        })
    }
}

/// A composable read plan producing a typed hierarchy.
///
/// [`plan`](Self::plan) may be embedded in a larger caller-built traversal, with the
/// resulting projection handed back to [`decode`](Self::decode).
pub struct FoldTraversal<'a, E: HierarchyEntity> {
    registry: &'a AdapterRegistry<E>,
    plan: Arc<Traversal>,
}

impl<E: HierarchyEntity> FoldTraversal<'_, E> {
    pub fn plan(&self) -> &Arc<Traversal> {
        &self.plan
    }

    /// Evaluates the plan at `at` and materialises the result.
    ///
    /// Stopping at the depth limit is not an error: the hierarchy then simply starts
    /// below the registry root.
    ///
    /// # Errors
    ///
    /// * [`DbError::UnrecognizedLabel`] if a visited vertex, `at` or any ancestor, matches
    ///   no adapter
    /// * [`DbError::HierarchyGap`] if a non-root level has no outgoing `Extends` edge while
    ///   depth remains, if its parent is decoded as something other than its supertype,
    ///   or if a root level has a parent
    /// * [`DbError::Graph`] for any store failure, unchanged
    pub fn execute<S: PlanExecutor + ?Sized>(
        &self,
        store: &S,
        at: VertexId,
    ) -> Result<Hierarchy<E>> {
        let projection = store.evaluate(at, &self.plan).map_err(|err| match err {
            GraphError::UnrecognizedLabel { vertex, label } => {
                DbError::UnrecognizedLabel { vertex, label }
            }
            other => DbError::Graph(other),
        })?;
        self.decode(&projection)
    }

    /// Materialises one entity per projected vertex and links consecutive levels.
    ///
    /// Applies the same parent checks as [`execute`](Self::execute).
    pub fn decode(&self, projection: &Projection) -> Result<Hierarchy<E>> {
        let mut levels: Vec<(&dyn LeafAdapter<E>, &Vertex)> = Vec::new();
        let mut current = Some(projection);

        while let Some(level) = current {
            let adapter = self.registry.get(&level.decoded_as).ok_or_else(|| {
                DbError::UnrecognizedLabel {
                    vertex: level.vertex.id,
                    label: level.decoded_as.clone(),
                }
            })?;
            self.check_parent(adapter, &level.upward)?;
            levels.push((adapter, &level.vertex));
            current = level.parent();
        }

        let mut entities = levels
            .iter()
            .rev()
            .map(|(adapter, vertex)| adapter.materialize(vertex));

        let top = match entities.next() {
            Some(entity) => entity?,
            None => unreachable!("a projection has at least one level"),
        };
        let mut hierarchy = Hierarchy::root(top);
        for entity in entities {
            let parent = hierarchy.leaf_index();
            let child = hierarchy.push_unlinked(entity?);
            link(&mut hierarchy, parent, child);
        }

        Ok(hierarchy)
    }

    fn check_parent(&self, adapter: &dyn LeafAdapter<E>, upward: &Upward) -> Result<()> {
        let found = match upward {
            Upward::Cutoff => return Ok(()),
            Upward::Missing => None,
            Upward::Found(parent) => Some(parent.decoded_as.as_str()),
        };

        if found == adapter.supertype() {
            return Ok(());
        }

        Err(DbError::HierarchyGap {
            child: adapter.label().to_string(),
            expected: adapter.supertype().map(str::to_string),
            found: found.map(str::to_string),
        })
    }
}

/// A write plan for one hierarchy, ready for the caller to execute.
#[derive(Debug)]
pub struct UnfoldTraversal<'h, E> {
    label: &'static str,
    entity: &'h E,
    plan: Mutation,
}

impl<'h, E> UnfoldTraversal<'h, E> {
    /// Label of the root vertex the plan starts at.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The entity the plan was built for.
    pub fn entity(&self) -> &'h E {
        self.entity
    }

    pub fn plan(&self) -> &Mutation {
        &self.plan
    }

    pub fn into_plan(self) -> Mutation {
        self.plan
    }

    /// Runs the plan and returns the vertex of the entity it was built for.
    pub fn execute<S: PlanExecutor + ?Sized>(&self, store: &mut S) -> Result<VertexId> {
        Ok(store.execute(&self.plan)?)
    }
}
