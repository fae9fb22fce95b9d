//! Store primitives the plan interpreter is written against.

use crate::{
    element::{Edge, EdgeId, Vertex, VertexId},
    error::Result,
    mutation::Mutation,
    traversal::{Projection, Traversal},
    value::Properties,
};

/// Read primitives of a property-graph store.
pub trait GraphStore {
    fn vertex(&self, id: VertexId) -> Option<&Vertex>;

    /// Edges labelled `label` leaving `id`, oldest first.
    fn out_edges(&self, id: VertexId, label: &str) -> Vec<&Edge>;

    /// Edges labelled `label` arriving at `id`, oldest first.
    fn in_edges(&self, id: VertexId, label: &str) -> Vec<&Edge>;

    fn find_by_identity(&self, label: &str, uuid: &str) -> Option<VertexId>;
}

/// Write primitives of a property-graph store.
pub trait GraphStoreMut: GraphStore {
    fn insert_vertex(&mut self, label: &str, properties: Properties) -> VertexId;

    fn replace_properties(&mut self, id: VertexId, properties: Properties) -> Result<()>;

    fn insert_edge(&mut self, label: &str, out_v: VertexId, in_v: VertexId) -> Result<EdgeId>;
}

/// A store that runs whole plans.
///
/// This is all the persistence layer sees of a store: it hands over one composed plan
/// and gets back either the full result or an error.
pub trait PlanExecutor {
    fn evaluate(&self, start: VertexId, traversal: &Traversal) -> Result<Projection>;

    /// Executes a write plan as a unit and returns the vertex it ends at.
    fn execute(&mut self, mutation: &Mutation) -> Result<VertexId>;
}
