//! Evaluates read and write plans over the store primitives.

use tracing::trace;

use crate::{
    element::{Edge, VertexId},
    error::{GraphError, Result},
    mutation::Mutation,
    store::{GraphStore, GraphStoreMut},
    traversal::{Predicate, Projection, Traversal, Upward},
};

fn holds<S: GraphStore + ?Sized>(store: &S, at: VertexId, predicate: &Predicate) -> Result<bool> {
    let vertex = store.vertex(at).ok_or(GraphError::VertexNotFound(at))?;
    Ok(match predicate {
        Predicate::HasLabel(label) => vertex.label == *label,
        Predicate::HasIncoming(edge) => !store.in_edges(at, edge).is_empty(),
        Predicate::HasOutgoing(edge) => !store.out_edges(at, edge).is_empty(),
    })
}

/// The far end of the only `edge` edge in `edges`, if there is one.
fn single_neighbour(
    at: VertexId,
    edge: &str,
    edges: &[&Edge],
    far_end: fn(&Edge) -> VertexId,
) -> Result<Option<VertexId>> {
    match edges {
        [] => Ok(None),
        [only] => Ok(Some(far_end(only))),
        _ => Err(GraphError::AmbiguousEdge {
            vertex: at,
            edge: edge.to_string(),
            count: edges.len(),
        }),
    }
}

/// Evaluates `traversal` starting at `start`.
pub fn evaluate<S: GraphStore + ?Sized>(
    store: &S,
    start: VertexId,
    traversal: &Traversal,
) -> Result<Projection> {
    match traversal {
        Traversal::Emit { label } => {
            let vertex = store
                .vertex(start)
                .ok_or(GraphError::VertexNotFound(start))?;
            trace!("emit {} as {}", start, label);
            Ok(Projection {
                vertex: vertex.clone(),
                decoded_as: label.clone(),
                upward: Upward::Cutoff,
            })
        }
        Traversal::Choose {
            when,
            then,
            otherwise,
        } => {
            if holds(store, start, when)? {
                evaluate(store, start, then)
            } else {
                evaluate(store, start, otherwise)
            }
        }
        Traversal::Project {
            level,
            edge,
            parent,
        } => {
            let mut projection = evaluate(store, start, level)?;
            let target = single_neighbour(start, edge, &store.out_edges(start, edge), |e| e.in_v)?;
            projection.upward = match target {
                Some(target) => {
                    trace!("ascend {} -[{}]-> {}", start, edge, target);
                    Upward::Found(Box::new(evaluate(store, target, parent)?))
                }
                None => Upward::Missing,
            };
            Ok(projection)
        }
        Traversal::Unrecognized => {
            let vertex = store
                .vertex(start)
                .ok_or(GraphError::VertexNotFound(start))?;
            Err(GraphError::UnrecognizedLabel {
                vertex: start,
                label: vertex.label.clone(),
            })
        }
    }
}

/// Applies `mutation` and returns the vertex the plan ends at.
///
/// The store is mutated step by step; callers that need all-or-nothing semantics run
/// this against a staging copy.
pub fn apply<S: GraphStoreMut + ?Sized>(store: &mut S, mutation: &Mutation) -> Result<VertexId> {
    apply_at(store, None, mutation)
}

fn apply_at<S: GraphStoreMut + ?Sized>(
    store: &mut S,
    position: Option<VertexId>,
    mutation: &Mutation,
) -> Result<VertexId> {
    match mutation {
        Mutation::Save(write) => {
            let properties = write.stored_properties();
            match store.find_by_identity(&write.label, &write.uuid) {
                Some(id) => {
                    trace!("save {}:{} updates {}", write.label, write.uuid, id);
                    store.replace_properties(id, properties)?;
                    Ok(id)
                }
                None => {
                    let id = store.insert_vertex(&write.label, properties);
                    trace!("save {}:{} creates {}", write.label, write.uuid, id);
                    Ok(id)
                }
            }
        }
        Mutation::Update(write) => {
            let at = position.ok_or(GraphError::NoPosition("update"))?;
            let vertex = store.vertex(at).ok_or(GraphError::VertexNotFound(at))?;
            if vertex.label != write.label {
                return Err(GraphError::LabelMismatch {
                    vertex: at,
                    expected: write.label.clone(),
                    found: vertex.label.clone(),
                });
            }
            trace!("update {} in place", at);
            store.replace_properties(at, write.stored_properties())?;
            Ok(at)
        }
        Mutation::Then { first, next } => {
            let at = apply_at(store, position, first)?;
            apply_at(store, Some(at), next)
        }
        Mutation::Choose {
            when,
            then,
            otherwise,
        } => {
            let at = position.ok_or(GraphError::NoPosition("choose"))?;
            if holds(store, at, when)? {
                apply_at(store, Some(at), then)
            } else {
                apply_at(store, Some(at), otherwise)
            }
        }
        Mutation::In { edge, then } => {
            let at = position.ok_or(GraphError::NoPosition("in"))?;
            let source = single_neighbour(at, edge, &store.in_edges(at, edge), |e| e.out_v)?
                .ok_or_else(|| GraphError::MissingEdge {
                    vertex: at,
                    edge: edge.clone(),
                })?;
            apply_at(store, Some(source), then)
        }
        Mutation::AddEdgeFrom { edge, from } => {
            let at = position.ok_or(GraphError::NoPosition("add edge"))?;
            let source = apply_at(store, Some(at), from)?;
            store.insert_edge(edge, source, at)?;
            trace!("edge {} -[{}]-> {}", source, edge, at);
            Ok(source)
        }
    }
}
