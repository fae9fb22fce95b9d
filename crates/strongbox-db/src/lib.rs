//! Entity-to-graph persistence for strongbox.
//!
//! Domain objects that form a type hierarchy are stored one vertex per hierarchy level,
//! each level linked to its more general parent with an `Extends` edge. A
//! [`LeafAdapter`] translates one concrete level; the [`EntityUpwardHierarchyAdapter`]
//! composes them into whole-chain reads ([`fold`](EntityUpwardHierarchyAdapter::fold))
//! and writes ([`unfold`](EntityUpwardHierarchyAdapter::unfold)).

pub mod adapter;
pub mod coordinates;
pub mod entity;
pub mod error;
pub mod hierarchy;
mod link;
pub mod plan;
pub mod registry;

#[cfg(test)]
mod test_utils;

pub use adapter::{BoxedAdapter, LeafAdapter, PropertyReader};
pub use entity::{Hierarchy, HierarchyEntity};
pub use error::{DbError, Result};
pub use hierarchy::{EntityUpwardHierarchyAdapter, FoldTraversal, UnfoldTraversal};
pub use registry::AdapterRegistry;
