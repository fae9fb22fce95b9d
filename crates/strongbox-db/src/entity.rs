use std::fmt;

/// A domain object stored as one level of a type hierarchy.
///
/// Implementors are closed sets of tagged variants: every variant reports a `kind`,
/// which is also the vertex label of the adapter that persists it.
pub trait HierarchyEntity: Clone + fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> &'static str;

    fn uuid(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode<E> {
    pub entity: E,
    pub(crate) parent: Option<usize>,
    pub(crate) child: Option<usize>,
}

/// One logical object's type lineage, ordered from the most general level to the most
/// specific one.
///
/// Parent and child references are indices into this list. A hierarchy is built per
/// call, either by a caller assembling a chain to store or by a fold materialising one,
/// and is never shared with the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy<E> {
    pub(crate) nodes: Vec<HierarchyNode<E>>,
}

impl<E> Hierarchy<E> {
    /// Starts a hierarchy at its topmost level.
    pub fn root(entity: E) -> Self {
        Self {
            nodes: vec![HierarchyNode {
                entity,
                parent: None,
                child: None,
            }],
        }
    }

    /// Appends a more specific level below the current leaf and returns its index.
    pub fn push_child(&mut self, entity: E) -> usize {
        let parent = self.leaf_index();
        let child = self.push_unlinked(entity);
        crate::link::link(self, parent, child);
        child
    }

    pub fn with_child(mut self, entity: E) -> Self {
        self.push_child(entity);
        self
    }

    pub(crate) fn push_unlinked(&mut self, entity: E) -> usize {
        self.nodes.push(HierarchyNode {
            entity,
            parent: None,
            child: None,
        });
        self.nodes.len() - 1
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.nodes.get(index).map(|node| &node.entity)
    }

    pub fn leaf_index(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// The most specific level.
    pub fn leaf(&self) -> &E {
        &self.nodes[self.leaf_index()].entity
    }

    /// The topmost materialised level.
    ///
    /// After a depth-bounded fold this need not be the most general type.
    pub fn top(&self) -> &E {
        &self.nodes[0].entity
    }

    pub fn parent_of(&self, index: usize) -> Option<usize> {
        self.nodes.get(index).and_then(|node| node.parent)
    }

    pub fn child_of(&self, index: usize) -> Option<usize> {
        self.nodes.get(index).and_then(|node| node.child)
    }

    /// Indices from `index` up through its parents, `index` first.
    pub fn lineage(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(
            (index < self.nodes.len()).then_some(index),
            move |&i| self.parent_of(i),
        )
    }

    /// Entities from the top down to the leaf.
    pub fn entities(&self) -> impl Iterator<Item = &E> {
        self.nodes.iter().map(|node| &node.entity)
    }
}

impl<E> Hierarchy<E> {
    /// Builds a linked hierarchy from entities ordered top first.
    ///
    /// Returns `None` for an empty list.
    pub fn from_chain<I: IntoIterator<Item = E>>(chain: I) -> Option<Self> {
        let mut iter = chain.into_iter();
        let mut hierarchy = Hierarchy::root(iter.next()?);
        for entity in iter {
            hierarchy.push_child(entity);
        }
        Some(hierarchy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_child_links_both_ways() {
        let hierarchy = Hierarchy::root("generic").with_child("maven").with_child("plugin");

        assert_eq!(hierarchy.len(), 3);
        assert_eq!(*hierarchy.top(), "generic");
        assert_eq!(*hierarchy.leaf(), "plugin");
        assert_eq!(hierarchy.parent_of(2), Some(1));
        assert_eq!(hierarchy.child_of(1), Some(2));
        assert_eq!(hierarchy.parent_of(0), None);
        assert_eq!(hierarchy.child_of(2), None);
    }

    #[test]
    fn test_lineage_walks_to_top() {
        let hierarchy = Hierarchy::from_chain(["generic", "maven", "plugin"]).unwrap();

        assert_eq!(hierarchy.lineage(2).collect::<Vec<_>>(), vec![2, 1, 0]);
        assert_eq!(hierarchy.lineage(1).collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(hierarchy.lineage(7).count(), 0);
    }

    #[test]
    fn test_from_chain_empty() {
        assert!(Hierarchy::<&str>::from_chain(Vec::new()).is_none());
    }
}
