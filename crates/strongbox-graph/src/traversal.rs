//! Read plans.
//!
//! A [`Traversal`] is a small immutable tree of steps evaluated against one starting
//! vertex. Subtrees are shared through [`Arc`], so a plan that probes the same
//! continuation from many branches stays linear in size.

use std::{collections::HashSet, sync::Arc};

use crate::element::Vertex;

/// A condition tested against the current vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    HasLabel(String),
    HasIncoming(String),
    HasOutgoing(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Materialise the current vertex as a level decoded by the adapter for `label`.
    Emit { label: String },

    /// Evaluate `then` if `when` holds at the current vertex, `otherwise` if not.
    Choose {
        when: Predicate,
        then: Arc<Traversal>,
        otherwise: Arc<Traversal>,
    },

    /// Evaluate `level` here, then follow the outgoing `edge` and evaluate `parent`
    /// at the vertex it leads to.
    Project {
        level: Arc<Traversal>,
        edge: String,
        parent: Arc<Traversal>,
    },

    /// The current vertex has a label nobody recognises.
    Unrecognized,
}

impl Traversal {
    pub fn emit(label: impl Into<String>) -> Self {
        Traversal::Emit {
            label: label.into(),
        }
    }

    pub fn choose(when: Predicate, then: Arc<Traversal>, otherwise: Arc<Traversal>) -> Self {
        Traversal::Choose {
            when,
            then,
            otherwise,
        }
    }

    pub fn project(level: Arc<Traversal>, edge: impl Into<String>, parent: Arc<Traversal>) -> Self {
        Traversal::Project {
            level,
            edge: edge.into(),
            parent,
        }
    }

    /// Number of distinct plan nodes, counting shared subtrees once.
    pub fn node_count(&self) -> usize {
        fn visit(node: &Traversal, seen: &mut HashSet<*const Traversal>) {
            if !seen.insert(node as *const Traversal) {
                return;
            }
            match node {
                Traversal::Choose {
                    then, otherwise, ..
                } => {
                    visit(then, seen);
                    visit(otherwise, seen);
                }
                Traversal::Project { level, parent, .. } => {
                    visit(level, seen);
                    visit(parent, seen);
                }
                Traversal::Emit { .. } | Traversal::Unrecognized => {}
            }
        }

        let mut seen = HashSet::new();
        visit(self, &mut seen);
        seen.len()
    }
}

/// What happened above a materialised level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upward {
    /// The plan did not look for a parent.
    Cutoff,
    /// The plan looked for a parent and found no edge.
    Missing,
    Found(Box<Projection>),
}

/// The result of evaluating a [`Traversal`]: one materialised vertex per level,
/// most specific first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub vertex: Vertex,
    /// Label of the adapter that matched this vertex.
    pub decoded_as: String,
    pub upward: Upward,
}

impl Projection {
    pub fn parent(&self) -> Option<&Projection> {
        match &self.upward {
            Upward::Found(parent) => Some(parent),
            _ => None,
        }
    }

    /// Number of levels in this projection, including this one.
    pub fn levels(&self) -> usize {
        1 + self.parent().map_or(0, Projection::levels)
    }
}
