//! Error types for strongbox-db.

use miette::Diagnostic;
use strongbox_graph::{GraphError, VertexId};
use thiserror::Error;

fn describe(label: &Option<String>) -> String {
    match label {
        Some(label) => format!("`{label}`"),
        None => "none".to_string(),
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Duplicate adapter label: {0}")]
    #[diagnostic(
        code(strongbox_db::duplicate_adapter_label),
        help("Each entity type must be registered exactly once")
    )]
    DuplicateAdapterLabel(String),

    #[error("Adapter `{label}` extends unregistered type `{supertype}`")]
    #[diagnostic(
        code(strongbox_db::unknown_supertype),
        help("Register an adapter for every type in the hierarchy")
    )]
    UnknownSupertype { label: String, supertype: String },

    #[error("Adapter hierarchy contains a cycle through `{0}`")]
    #[diagnostic(code(strongbox_db::hierarchy_cycle))]
    HierarchyCycle(String),

    #[error("Adapter hierarchy has more than one root: {}", .0.join(", "))]
    #[diagnostic(
        code(strongbox_db::multiple_roots),
        help("Exactly one adapter may omit its supertype")
    )]
    MultipleRoots(Vec<String>),

    #[error("Adapter registry is empty")]
    #[diagnostic(code(strongbox_db::empty_registry))]
    EmptyRegistry,

    #[error("Invalid hierarchy root type `{found}`, should be `{expected}`")]
    #[diagnostic(
        code(strongbox_db::invalid_hierarchy_root),
        help("Attach the missing ancestors before storing the entity")
    )]
    InvalidHierarchyRoot { found: String, expected: String },

    #[error("No adapter registered for entity type `{0}`")]
    #[diagnostic(code(strongbox_db::unregistered_entity))]
    UnregisteredEntity(String),

    #[error("Adapter `{adapter}` cannot handle entity type `{found}`")]
    #[diagnostic(code(strongbox_db::entity_mismatch))]
    EntityMismatch { adapter: String, found: String },

    #[error(
        "Broken hierarchy at `{child}`: expected parent {}, found {}",
        describe(.expected),
        describe(.found)
    )]
    #[diagnostic(
        code(strongbox_db::hierarchy_gap),
        help("A hierarchy level was never persisted or was attached to the wrong parent")
    )]
    HierarchyGap {
        child: String,
        expected: Option<String>,
        found: Option<String>,
    },

    #[error("Vertex {vertex} has unrecognized label `{label}`")]
    #[diagnostic(
        code(strongbox_db::unrecognized_label),
        help("The graph contains data no registered adapter understands")
    )]
    UnrecognizedLabel { vertex: VertexId, label: String },

    #[error("Invalid property `{key}` on `{label}` vertex: {reason}")]
    #[diagnostic(code(strongbox_db::invalid_property))]
    InvalidProperty {
        label: String,
        key: String,
        reason: String,
    },

    #[error("Hierarchy has no node {0}")]
    #[diagnostic(code(strongbox_db::unknown_node))]
    UnknownNode(usize),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_gap_message() {
        let err = DbError::HierarchyGap {
            child: "MavenPluginCoordinates".into(),
            expected: Some("MavenArtifactCoordinates".into()),
            found: None,
        };
        assert_eq!(
            err.to_string(),
            "Broken hierarchy at `MavenPluginCoordinates`: expected parent \
             `MavenArtifactCoordinates`, found none"
        );
    }

    #[test]
    fn test_multiple_roots_message() {
        let err = DbError::MultipleRoots(vec!["A".into(), "B".into()]);
        assert_eq!(err.to_string(), "Adapter hierarchy has more than one root: A, B");
    }
}
