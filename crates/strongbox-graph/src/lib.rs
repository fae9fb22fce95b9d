//! Property-graph primitives for strongbox.
//!
//! Domain metadata is stored as labelled vertices carrying a property bag, joined by
//! labelled edges. Callers never mutate the graph directly: they build an immutable
//! plan value ([`Traversal`] for reads, [`Mutation`] for writes) and hand it to a store,
//! which either executes the whole plan or fails it.

pub mod element;
pub mod error;
pub mod interpreter;
pub mod memory;
pub mod mutation;
pub mod store;
pub mod traversal;
pub mod value;

pub use element::{edges, Edge, EdgeId, Vertex, VertexId, VertexWrite, UUID_PROPERTY};
pub use error::{GraphError, Result};
pub use memory::MemoryGraph;
pub use mutation::Mutation;
pub use store::{GraphStore, GraphStoreMut, PlanExecutor};
pub use traversal::{Predicate, Projection, Traversal, Upward};
pub use value::{Properties, PropertyValue};
