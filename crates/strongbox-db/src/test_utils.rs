//! A small shape hierarchy used to exercise the adapters without the artifact model.
//!
//! `Shape` is the root; `Rectangle` and `Circle` extend it; `Square` extends `Rectangle`.

use std::collections::BTreeMap;

use strongbox_graph::{PropertyValue, Vertex, VertexWrite, UUID_PROPERTY};

use crate::{
    adapter::{BoxedAdapter, LeafAdapter, PropertyReader},
    entity::{Hierarchy, HierarchyEntity},
    error::{DbError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub kind: &'static str,
    pub uuid: String,
    pub attrs: BTreeMap<String, String>,
}

impl Shape {
    pub fn new(kind: &'static str, uuid: &str, attrs: &[(&str, String)]) -> Self {
        Self {
            kind,
            uuid: uuid.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    pub fn shape(uuid: &str, name: &str) -> Self {
        Self::new("Shape", uuid, &[("name", name.to_string())])
    }

    pub fn rectangle(uuid: &str, width: u32, height: u32) -> Self {
        Self::new(
            "Rectangle",
            uuid,
            &[("width", width.to_string()), ("height", height.to_string())],
        )
    }

    pub fn square(uuid: &str, side: u32) -> Self {
        Self::new("Square", uuid, &[("side", side.to_string())])
    }

    pub fn circle(uuid: &str, radius: u32) -> Self {
        Self::new("Circle", uuid, &[("radius", radius.to_string())])
    }
}

impl HierarchyEntity for Shape {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

pub struct NamedAdapter {
    label: &'static str,
    supertype: Option<&'static str>,
}

impl LeafAdapter<Shape> for NamedAdapter {
    fn label(&self) -> &'static str {
        self.label
    }

    fn supertype(&self) -> Option<&'static str> {
        self.supertype
    }

    fn materialize(&self, vertex: &Vertex) -> Result<Shape> {
        let reader = PropertyReader::new(vertex);
        let mut attrs = BTreeMap::new();
        for key in vertex.properties.keys().filter(|k| *k != UUID_PROPERTY) {
            attrs.insert(key.clone(), reader.string(key)?);
        }
        Ok(Shape {
            kind: self.label,
            uuid: reader.uuid()?,
            attrs,
        })
    }

    fn unfold(&self, entity: &Shape) -> Result<VertexWrite> {
        if !self.accepts(entity) {
            return Err(DbError::EntityMismatch {
                adapter: self.label.to_string(),
                found: entity.kind.to_string(),
            });
        }
        let mut write = VertexWrite::new(self.label, &entity.uuid);
        for (key, value) in &entity.attrs {
            write = write.property(key.clone(), PropertyValue::String(value.clone()));
        }
        Ok(write)
    }
}

pub fn adapter(label: &'static str, supertype: Option<&'static str>) -> BoxedAdapter<Shape> {
    Box::new(NamedAdapter { label, supertype })
}

/// The shape adapters, deliberately not in registry order.
pub fn adapters() -> Vec<BoxedAdapter<Shape>> {
    vec![
        adapter("Shape", None),
        adapter("Rectangle", Some("Shape")),
        adapter("Square", Some("Rectangle")),
        adapter("Circle", Some("Shape")),
    ]
}

/// `Shape -> Rectangle -> Square`, all sharing one uuid.
pub fn square_chain(uuid: &str, side: u32) -> Hierarchy<Shape> {
    Hierarchy::root(Shape::shape(uuid, "tile"))
        .with_child(Shape::rectangle(uuid, side, side))
        .with_child(Shape::square(uuid, side))
}
