//! Error types for strongbox-graph.

use miette::Diagnostic;
use strongbox_utils::error::FileSystemError;
use thiserror::Error;

use crate::element::VertexId;

#[derive(Error, Diagnostic, Debug)]
pub enum GraphError {
    #[error("Vertex {0} not found")]
    #[diagnostic(
        code(strongbox_graph::vertex_not_found),
        help("Check the vertex id; it may belong to a different graph snapshot")
    )]
    VertexNotFound(VertexId),

    #[error("Step `{0}` requires a current vertex")]
    #[diagnostic(
        code(strongbox_graph::no_position),
        help("Positional steps must follow a step that selects a vertex")
    )]
    NoPosition(&'static str),

    #[error("Vertex {vertex} has no incoming `{edge}` edge")]
    #[diagnostic(code(strongbox_graph::missing_edge))]
    MissingEdge { vertex: VertexId, edge: String },

    #[error("Vertex {vertex} has {count} `{edge}` edges where one was expected")]
    #[diagnostic(
        code(strongbox_graph::ambiguous_edge),
        help("A hierarchy level links to exactly one parent and one child; remove the extra edges")
    )]
    AmbiguousEdge {
        vertex: VertexId,
        edge: String,
        count: usize,
    },

    #[error("Vertex {vertex} is labelled `{found}`, expected `{expected}`")]
    #[diagnostic(
        code(strongbox_graph::label_mismatch),
        help("An existing vertex cannot change its label in place")
    )]
    LabelMismatch {
        vertex: VertexId,
        expected: String,
        found: String,
    },

    #[error("Identity `{label}:{uuid}` already belongs to vertex {owner}")]
    #[diagnostic(code(strongbox_graph::identity_conflict))]
    IdentityConflict {
        label: String,
        uuid: String,
        owner: VertexId,
    },

    #[error("Vertex {vertex} has unrecognized label `{label}`")]
    #[diagnostic(
        code(strongbox_graph::unrecognized_label),
        help("The vertex label matches no registered adapter; the graph may hold foreign or corrupted data")
    )]
    UnrecognizedLabel { vertex: VertexId, label: String },

    #[error("Invalid graph snapshot: {0}")]
    #[diagnostic(
        code(strongbox_graph::snapshot),
        help("The snapshot file may be corrupted. Restore it from a backup.")
    )]
    Snapshot(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FileSystem(#[from] FileSystemError),
}

pub type Result<T> = std::result::Result<T, GraphError>;
