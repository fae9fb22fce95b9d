use crate::entity::Hierarchy;

/// Wires `parent` and `child` to each other.
///
/// Called once per ascended level while a hierarchy is assembled. Each node is linked
/// at most once per call.
pub(crate) fn link<E>(hierarchy: &mut Hierarchy<E>, parent: usize, child: usize) {
    debug_assert!(
        hierarchy.nodes[child].parent.is_none() && hierarchy.nodes[parent].child.is_none(),
        "hierarchy node linked twice"
    );
    hierarchy.nodes[child].parent = Some(parent);
    hierarchy.nodes[parent].child = Some(child);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_is_symmetric() {
        let mut hierarchy = Hierarchy::root("generic");
        let child = hierarchy.push_unlinked("maven");
        assert_eq!(hierarchy.parent_of(child), None);

        link(&mut hierarchy, 0, child);

        assert_eq!(hierarchy.parent_of(child), Some(0));
        assert_eq!(hierarchy.child_of(0), Some(child));
    }
}
