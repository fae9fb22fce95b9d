//! Builds the label-conditioned plan trees shared by the read and write paths.

use std::sync::Arc;

use strongbox_graph::{edges::EXTENDS, Mutation, Predicate, Traversal, VertexWrite};

use crate::{entity::HierarchyEntity, registry::AdapterRegistry};

/// Builds the read plan that folds a vertex and up to `max_depth` ancestors.
///
/// At every level the plan probes the vertex label against each adapter, most specific
/// first. A match materialises that level and, while depth remains, follows the
/// `Extends` edge to the parent and probes again against the full registry. A vertex no
/// adapter matches ends in [`Traversal::Unrecognized`].
///
/// The continuation for depth `d - 1` is built once and shared by every branch at
/// depth `d`, so the plan grows linearly with registry size and depth.
pub fn fold_plan<E: HierarchyEntity>(
    registry: &AdapterRegistry<E>,
    max_depth: usize,
) -> Arc<Traversal> {
    let mut above: Option<Arc<Traversal>> = None;

    for _ in 0..=max_depth {
        let parent = above.take();
        let mut plan = Arc::new(Traversal::Unrecognized);

        for adapter in registry.iter().rev() {
            let level = Arc::new(adapter.fold());
            let matched = match &parent {
                None => level,
                Some(parent) => Arc::new(Traversal::project(level, EXTENDS, parent.clone())),
            };
            plan = Arc::new(Traversal::choose(
                Predicate::HasLabel(adapter.label().to_string()),
                matched,
                plan,
            ));
        }

        above = Some(plan);
    }

    above.unwrap_or_else(|| Arc::new(Traversal::Unrecognized))
}

/// Write step for one level below an already planned parent vertex.
///
/// If the parent already has a child over an `Extends` edge, that child is updated in
/// place; otherwise the child is saved and linked to the parent. Either way the plan
/// continues at the child.
pub fn child_step(write: VertexWrite) -> Mutation {
    Mutation::choose(
        Predicate::HasIncoming(EXTENDS.to_string()),
        Mutation::in_edge(EXTENDS, Mutation::update(write.clone())),
        Mutation::add_edge_from(EXTENDS, Mutation::save(write)),
    )
}

/// Chains the root write and one [`child_step`] per level below it.
pub fn unfold_plan<I>(root: VertexWrite, children: I) -> Mutation
where
    I: IntoIterator<Item = VertexWrite>,
{
    children
        .into_iter()
        .fold(Mutation::save(root), |plan, write| plan.then(child_step(write)))
}
