use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::value::{Properties, PropertyValue};

/// Property holding the identity of a vertex within its label.
pub const UUID_PROPERTY: &str = "uuid";

/// Edge labels used by the persistence layer.
pub mod edges {
    /// Runs out of a more specific vertex into its immediate, more general parent.
    pub const EXTENDS: &str = "Extends";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub u64);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parses `#12` as well as a bare `12`.
impl FromStr for VertexId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.strip_prefix('#').unwrap_or(s).parse().map(VertexId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub label: String,
    pub properties: Properties,
}

impl Vertex {
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn uuid(&self) -> Option<&str> {
        self.property(UUID_PROPERTY).and_then(PropertyValue::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub label: String,
    pub out_v: VertexId,
    pub in_v: VertexId,
}

/// The content a write step persists for one vertex.
///
/// A vertex is identified by `(label, uuid)`; saving the same identity twice updates
/// the existing vertex instead of creating another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexWrite {
    pub label: String,
    pub uuid: String,
    pub properties: Properties,
}

impl VertexWrite {
    pub fn new(label: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            uuid: uuid.into(),
            properties: Properties::new(),
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The full property bag to store, including the identity property.
    pub fn stored_properties(&self) -> Properties {
        let mut properties = self.properties.clone();
        properties.insert(
            UUID_PROPERTY.to_string(),
            PropertyValue::String(self.uuid.clone()),
        );
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_parse() {
        assert_eq!("#12".parse::<VertexId>().unwrap(), VertexId(12));
        assert_eq!("7".parse::<VertexId>().unwrap(), VertexId(7));
        assert!("#x".parse::<VertexId>().is_err());
        assert_eq!(VertexId(3).to_string().parse::<VertexId>().unwrap(), VertexId(3));
    }

    #[test]
    fn test_vertex_write_stores_identity() {
        let write = VertexWrite::new("Maven", "a-1")
            .property("groupId", "org.carlspring")
            .property("classifier", None::<String>);

        let stored = write.stored_properties();
        assert_eq!(stored.get(UUID_PROPERTY), Some(&PropertyValue::from("a-1")));
        assert_eq!(stored.get("groupId"), Some(&"org.carlspring".into()));
        assert_eq!(stored.get("classifier"), Some(&PropertyValue::Null));
        assert!(!write.properties.contains_key(UUID_PROPERTY));
    }

    #[test]
    fn test_vertex_id_display() {
        assert_eq!(VertexId(7).to_string(), "#7");
    }
}
