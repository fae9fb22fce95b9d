//! In-memory graph store with JSON snapshot persistence.

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use serde::{Deserialize, Serialize};
use strongbox_utils::fs::{read_optional, write_atomic};
use tracing::debug;

use crate::{
    element::{Edge, EdgeId, Vertex, VertexId},
    error::{GraphError, Result},
    interpreter,
    mutation::Mutation,
    store::{GraphStore, GraphStoreMut, PlanExecutor},
    traversal::{Projection, Traversal},
    value::Properties,
};

#[derive(Serialize, Deserialize)]
struct Snapshot {
    next_vertex: u64,
    next_edge: u64,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

/// A property graph held in memory.
///
/// Write plans are executed against a staging copy and committed only if every step
/// succeeds. A failed plan leaves the graph untouched.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    vertices: BTreeMap<VertexId, Vertex>,
    edges: BTreeMap<EdgeId, Edge>,
    next_vertex: u64,
    next_edge: u64,
    identities: HashMap<(String, String), VertexId>,
    outgoing: HashMap<VertexId, Vec<EdgeId>>,
    incoming: HashMap<VertexId, Vec<EdgeId>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot, or starts an empty graph if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let Some(content) = read_optional(path)? else {
            debug!("no graph snapshot at {}, starting empty", path.display());
            return Ok(Self::new());
        };

        let snapshot: Snapshot = serde_json::from_str(&content)?;
        let mut graph = Self {
            next_vertex: snapshot.next_vertex,
            next_edge: snapshot.next_edge,
            ..Self::default()
        };
        for vertex in snapshot.vertices {
            graph.index_vertex(&vertex);
            graph.vertices.insert(vertex.id, vertex);
        }
        for edge in snapshot.edges {
            graph.index_edge(&edge);
            graph.edges.insert(edge.id, edge);
        }

        debug!(
            "loaded graph snapshot {} ({} vertices, {} edges)",
            path.display(),
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = Snapshot {
            next_vertex: self.next_vertex,
            next_edge: self.next_edge,
            vertices: self.vertices.values().cloned().collect(),
            edges: self.edges.values().cloned().collect(),
        };
        let content = serde_json::to_vec_pretty(&snapshot)?;
        write_atomic(path, &content)?;
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    fn index_vertex(&mut self, vertex: &Vertex) {
        if let Some(uuid) = vertex.uuid() {
            self.identities
                .insert((vertex.label.clone(), uuid.to_string()), vertex.id);
        }
    }

    fn index_edge(&mut self, edge: &Edge) {
        self.outgoing.entry(edge.out_v).or_default().push(edge.id);
        self.incoming.entry(edge.in_v).or_default().push(edge.id);
    }

    fn edges_by(&self, ids: Option<&Vec<EdgeId>>, label: &str) -> Vec<&Edge> {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.edges.get(id))
            .filter(|edge| edge.label == label)
            .collect()
    }
}

impl PlanExecutor for MemoryGraph {
    fn evaluate(&self, start: VertexId, traversal: &Traversal) -> Result<Projection> {
        interpreter::evaluate(self, start, traversal)
    }

    fn execute(&mut self, mutation: &Mutation) -> Result<VertexId> {
        let mut staged = self.clone();
        let end = interpreter::apply(&mut staged, mutation)?;
        debug!(
            "committed write plan: {} vertices (+{}), {} edges (+{})",
            staged.vertex_count(),
            staged.vertex_count() - self.vertex_count(),
            staged.edge_count(),
            staged.edge_count() - self.edge_count()
        );
        *self = staged;
        Ok(end)
    }
}

impl GraphStore for MemoryGraph {
    fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    fn out_edges(&self, id: VertexId, label: &str) -> Vec<&Edge> {
        self.edges_by(self.outgoing.get(&id), label)
    }

    fn in_edges(&self, id: VertexId, label: &str) -> Vec<&Edge> {
        self.edges_by(self.incoming.get(&id), label)
    }

    fn find_by_identity(&self, label: &str, uuid: &str) -> Option<VertexId> {
        self.identities
            .get(&(label.to_string(), uuid.to_string()))
            .copied()
    }
}

impl GraphStoreMut for MemoryGraph {
    fn insert_vertex(&mut self, label: &str, properties: Properties) -> VertexId {
        self.next_vertex += 1;
        let vertex = Vertex {
            id: VertexId(self.next_vertex),
            label: label.to_string(),
            properties,
        };
        let id = vertex.id;
        self.index_vertex(&vertex);
        self.vertices.insert(id, vertex);
        id
    }

    fn replace_properties(&mut self, id: VertexId, properties: Properties) -> Result<()> {
        let vertex = self.vertices.get(&id).ok_or(GraphError::VertexNotFound(id))?;
        let label = vertex.label.clone();
        let old_uuid = vertex.uuid().map(str::to_string);

        let new_uuid = properties
            .get(crate::element::UUID_PROPERTY)
            .and_then(|v| v.as_str())
            .map(str::to_string);

        if new_uuid != old_uuid {
            if let Some(uuid) = &new_uuid {
                if let Some(owner) = self.find_by_identity(&label, uuid) {
                    return Err(GraphError::IdentityConflict {
                        label,
                        uuid: uuid.clone(),
                        owner,
                    });
                }
            }
            if let Some(uuid) = old_uuid {
                self.identities.remove(&(label.clone(), uuid));
            }
            if let Some(uuid) = new_uuid {
                self.identities.insert((label, uuid), id);
            }
        }

        if let Some(vertex) = self.vertices.get_mut(&id) {
            vertex.properties = properties;
        }
        Ok(())
    }

    fn insert_edge(&mut self, label: &str, out_v: VertexId, in_v: VertexId) -> Result<EdgeId> {
        for id in [out_v, in_v] {
            if !self.vertices.contains_key(&id) {
                return Err(GraphError::VertexNotFound(id));
            }
        }

        self.next_edge += 1;
        let edge = Edge {
            id: EdgeId(self.next_edge),
            label: label.to_string(),
            out_v,
            in_v,
        };
        let id = edge.id;
        self.index_edge(&edge);
        self.edges.insert(id, edge);
        Ok(id)
    }
}
