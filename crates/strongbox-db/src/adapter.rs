//! Per-type translators between one entity variant and one vertex.

use strongbox_graph::{PropertyValue, Traversal, Vertex, VertexWrite};

use crate::{
    entity::HierarchyEntity,
    error::{DbError, Result},
};

/// Translates one concrete entity type to and from a single vertex.
///
/// An adapter only knows its own level: the properties it reads and writes belong to
/// one vertex, and linking levels together is left to the hierarchy adapter.
pub trait LeafAdapter<E: HierarchyEntity>: Send + Sync {
    /// Vertex label of this type.
    fn label(&self) -> &'static str;

    /// Label of the immediate supertype, `None` for the hierarchy root.
    fn supertype(&self) -> Option<&'static str>;

    /// The entity kind this adapter handles.
    fn declared_type(&self) -> &'static str {
        self.label()
    }

    fn accepts(&self, entity: &E) -> bool {
        entity.kind() == self.declared_type()
    }

    /// Single-vertex read plan for this level.
    fn fold(&self) -> Traversal {
        Traversal::emit(self.label())
    }

    /// Builds the entity from a vertex matched by [`fold`](Self::fold).
    fn materialize(&self, vertex: &Vertex) -> Result<E>;

    /// Single-vertex write for this level.
    fn unfold(&self, entity: &E) -> Result<VertexWrite>;
}

pub type BoxedAdapter<E> = Box<dyn LeafAdapter<E>>;

/// Typed access to the properties of a vertex being materialised.
pub struct PropertyReader<'a> {
    vertex: &'a Vertex,
}

impl<'a> PropertyReader<'a> {
    pub fn new(vertex: &'a Vertex) -> Self {
        Self { vertex }
    }

    pub(crate) fn invalid(&self, key: &str, reason: impl Into<String>) -> DbError {
        DbError::InvalidProperty {
            label: self.vertex.label.clone(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a PropertyValue> {
        self.vertex.property(key).filter(|value| !value.is_null())
    }

    pub fn uuid(&self) -> Result<String> {
        self.string(strongbox_graph::UUID_PROPERTY)
    }

    pub fn string(&self, key: &str) -> Result<String> {
        self.optional_string(key)?
            .ok_or_else(|| self.invalid(key, "missing"))
    }

    pub fn optional_string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(PropertyValue::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.invalid(key, format!("expected string, found {}", other.kind()))),
        }
    }

    /// A list property; a missing list reads as empty.
    pub fn list(&self, key: &str) -> Result<Vec<String>> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(PropertyValue::List(items)) => Ok(items.clone()),
            Some(other) => Err(self.invalid(key, format!("expected list, found {}", other.kind()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use strongbox_graph::{Properties, VertexId};

    use super::*;

    fn vertex() -> Vertex {
        let mut properties = Properties::new();
        properties.insert("uuid".into(), "a-1".into());
        properties.insert("name".into(), "left-pad".into());
        properties.insert("scope".into(), PropertyValue::Null);
        properties.insert("size".into(), 12i64.into());
        properties.insert("tags".into(), vec!["x".to_string()].into());
        Vertex {
            id: VertexId(1),
            label: "NpmArtifactCoordinates".into(),
            properties,
        }
    }

    #[test]
    fn test_reader_strings() {
        let vertex = vertex();
        let reader = PropertyReader::new(&vertex);

        assert_eq!(reader.uuid().unwrap(), "a-1");
        assert_eq!(reader.string("name").unwrap(), "left-pad");
        assert_eq!(reader.optional_string("scope").unwrap(), None);
        assert_eq!(reader.optional_string("absent").unwrap(), None);
        assert!(matches!(
            reader.string("scope"),
            Err(DbError::InvalidProperty { key, .. }) if key == "scope"
        ));
        assert!(matches!(
            reader.string("size"),
            Err(DbError::InvalidProperty { reason, .. }) if reason == "expected string, found integer"
        ));
    }

    #[test]
    fn test_reader_lists() {
        let vertex = vertex();
        let reader = PropertyReader::new(&vertex);

        assert_eq!(reader.list("tags").unwrap(), vec!["x".to_string()]);
        assert!(reader.list("absent").unwrap().is_empty());
        assert!(reader.list("name").is_err());
    }
}
