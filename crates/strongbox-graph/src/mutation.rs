//! Write plans.

use crate::{element::VertexWrite, traversal::Predicate};

/// An immutable write plan, executed by a store as a single unit.
///
/// Every step runs at an optional current vertex and yields the vertex the next step
/// continues from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Save-or-update the vertex identified by `(label, uuid)`; continue at it.
    Save(VertexWrite),

    /// Replace the properties of the current vertex in place. The label must match.
    Update(VertexWrite),

    /// Run `first`, then run `next` from wherever `first` ended.
    Then {
        first: Box<Mutation>,
        next: Box<Mutation>,
    },

    /// Run `then` if `when` holds at the current vertex, `otherwise` if not.
    Choose {
        when: Predicate,
        then: Box<Mutation>,
        otherwise: Box<Mutation>,
    },

    /// Move to the vertex at the far end of an incoming `edge`, then run `then` there.
    In { edge: String, then: Box<Mutation> },

    /// Run `from`, add an `edge` from its vertex to the current vertex, and continue at
    /// `from`'s vertex.
    AddEdgeFrom { edge: String, from: Box<Mutation> },
}

impl Mutation {
    pub fn save(write: VertexWrite) -> Self {
        Mutation::Save(write)
    }

    pub fn update(write: VertexWrite) -> Self {
        Mutation::Update(write)
    }

    pub fn then(self, next: Mutation) -> Self {
        Mutation::Then {
            first: Box::new(self),
            next: Box::new(next),
        }
    }

    pub fn choose(when: Predicate, then: Mutation, otherwise: Mutation) -> Self {
        Mutation::Choose {
            when,
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn in_edge(edge: impl Into<String>, then: Mutation) -> Self {
        Mutation::In {
            edge: edge.into(),
            then: Box::new(then),
        }
    }

    pub fn add_edge_from(edge: impl Into<String>, from: Mutation) -> Self {
        Mutation::AddEdgeFrom {
            edge: edge.into(),
            from: Box::new(from),
        }
    }

    /// Every vertex write mentioned anywhere in the plan, in plan order.
    pub fn writes(&self) -> Vec<&VertexWrite> {
        let mut out = Vec::new();
        self.collect_writes(&mut out);
        out
    }

    fn collect_writes<'a>(&'a self, out: &mut Vec<&'a VertexWrite>) {
        match self {
            Mutation::Save(write) | Mutation::Update(write) => out.push(write),
            Mutation::Then { first, next } => {
                first.collect_writes(out);
                next.collect_writes(out);
            }
            Mutation::Choose {
                then, otherwise, ..
            } => {
                then.collect_writes(out);
                otherwise.collect_writes(out);
            }
            Mutation::In { then, .. } => then.collect_writes(out),
            Mutation::AddEdgeFrom { from, .. } => from.collect_writes(out),
        }
    }
}
