use std::collections::BTreeMap;

use strongbox_graph::{Vertex, VertexWrite};

use super::{
    ArtifactCoordinates, GenericArtifactCoordinates, MavenArtifactCoordinates,
    MavenPluginCoordinates, NpmArtifactCoordinates, NugetArtifactCoordinates,
    RawArtifactCoordinates, GENERIC, MAVEN, MAVEN_PLUGIN, NPM, NUGET, RAW,
};
use crate::{
    adapter::{BoxedAdapter, LeafAdapter, PropertyReader},
    entity::HierarchyEntity,
    error::{DbError, Result},
    hierarchy::EntityUpwardHierarchyAdapter,
    registry::AdapterRegistry,
};

pub type ArtifactCoordinatesAdapter = EntityUpwardHierarchyAdapter<ArtifactCoordinates>;

fn mismatch(adapter: &str, entity: &ArtifactCoordinates) -> DbError {
    DbError::EntityMismatch {
        adapter: adapter.to_string(),
        found: entity.kind().to_string(),
    }
}

// Free-form coordinates are stored as two index-aligned lists.
const COORDINATE_KEYS: &str = "coordinateKeys";
const COORDINATE_VALUES: &str = "coordinateValues";

pub struct GenericCoordinatesAdapter;

impl LeafAdapter<ArtifactCoordinates> for GenericCoordinatesAdapter {
    fn label(&self) -> &'static str {
        GENERIC
    }

    fn supertype(&self) -> Option<&'static str> {
        None
    }

    fn materialize(&self, vertex: &Vertex) -> Result<ArtifactCoordinates> {
        let reader = PropertyReader::new(vertex);

        let keys = reader.list(COORDINATE_KEYS)?;
        let values = reader.list(COORDINATE_VALUES)?;
        if keys.len() != values.len() {
            return Err(reader.invalid(
                COORDINATE_VALUES,
                format!("{} values for {} keys", values.len(), keys.len()),
            ));
        }
        let coordinates: BTreeMap<String, String> = keys.into_iter().zip(values).collect();

        Ok(ArtifactCoordinates::Generic(GenericArtifactCoordinates {
            uuid: reader.uuid()?,
            version: reader.optional_string("version")?,
            coordinates,
        }))
    }

    fn unfold(&self, entity: &ArtifactCoordinates) -> Result<VertexWrite> {
        let ArtifactCoordinates::Generic(c) = entity else {
            return Err(mismatch(GENERIC, entity));
        };
        let (keys, values): (Vec<String>, Vec<String>) = c
            .coordinates
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .unzip();

        Ok(VertexWrite::new(GENERIC, &c.uuid)
            .property("version", c.version.clone())
            .property(COORDINATE_KEYS, keys)
            .property(COORDINATE_VALUES, values))
    }
}

pub struct MavenCoordinatesAdapter;

impl LeafAdapter<ArtifactCoordinates> for MavenCoordinatesAdapter {
    fn label(&self) -> &'static str {
        MAVEN
    }

    fn supertype(&self) -> Option<&'static str> {
        Some(GENERIC)
    }

    fn materialize(&self, vertex: &Vertex) -> Result<ArtifactCoordinates> {
        let reader = PropertyReader::new(vertex);
        Ok(ArtifactCoordinates::Maven(MavenArtifactCoordinates {
            uuid: reader.uuid()?,
            group_id: reader.string("groupId")?,
            artifact_id: reader.string("artifactId")?,
            version: reader.string("version")?,
            classifier: reader.optional_string("classifier")?,
            extension: reader.string("extension")?,
        }))
    }

    fn unfold(&self, entity: &ArtifactCoordinates) -> Result<VertexWrite> {
        let ArtifactCoordinates::Maven(c) = entity else {
            return Err(mismatch(MAVEN, entity));
        };
        Ok(VertexWrite::new(MAVEN, &c.uuid)
            .property("groupId", c.group_id.as_str())
            .property("artifactId", c.artifact_id.as_str())
            .property("version", c.version.as_str())
            .property("classifier", c.classifier.clone())
            .property("extension", c.extension.as_str()))
    }
}

pub struct MavenPluginCoordinatesAdapter;

impl LeafAdapter<ArtifactCoordinates> for MavenPluginCoordinatesAdapter {
    fn label(&self) -> &'static str {
        MAVEN_PLUGIN
    }

    fn supertype(&self) -> Option<&'static str> {
        Some(MAVEN)
    }

    fn materialize(&self, vertex: &Vertex) -> Result<ArtifactCoordinates> {
        let reader = PropertyReader::new(vertex);
        Ok(ArtifactCoordinates::MavenPlugin(MavenPluginCoordinates {
            uuid: reader.uuid()?,
            goal_prefix: reader.string("goalPrefix")?,
        }))
    }

    fn unfold(&self, entity: &ArtifactCoordinates) -> Result<VertexWrite> {
        let ArtifactCoordinates::MavenPlugin(c) = entity else {
            return Err(mismatch(MAVEN_PLUGIN, entity));
        };
        Ok(VertexWrite::new(MAVEN_PLUGIN, &c.uuid).property("goalPrefix", c.goal_prefix.as_str()))
    }
}

pub struct NpmCoordinatesAdapter;

impl LeafAdapter<ArtifactCoordinates> for NpmCoordinatesAdapter {
    fn label(&self) -> &'static str {
        NPM
    }

    fn supertype(&self) -> Option<&'static str> {
        Some(GENERIC)
    }

    fn materialize(&self, vertex: &Vertex) -> Result<ArtifactCoordinates> {
        let reader = PropertyReader::new(vertex);
        Ok(ArtifactCoordinates::Npm(NpmArtifactCoordinates {
            uuid: reader.uuid()?,
            scope: reader.optional_string("scope")?,
            name: reader.string("name")?,
            version: reader.string("version")?,
            extension: reader.string("extension")?,
        }))
    }

    fn unfold(&self, entity: &ArtifactCoordinates) -> Result<VertexWrite> {
        let ArtifactCoordinates::Npm(c) = entity else {
            return Err(mismatch(NPM, entity));
        };
        Ok(VertexWrite::new(NPM, &c.uuid)
            .property("scope", c.scope.clone())
            .property("name", c.name.as_str())
            .property("version", c.version.as_str())
            .property("extension", c.extension.as_str()))
    }
}

pub struct NugetCoordinatesAdapter;

impl LeafAdapter<ArtifactCoordinates> for NugetCoordinatesAdapter {
    fn label(&self) -> &'static str {
        NUGET
    }

    fn supertype(&self) -> Option<&'static str> {
        Some(GENERIC)
    }

    fn materialize(&self, vertex: &Vertex) -> Result<ArtifactCoordinates> {
        let reader = PropertyReader::new(vertex);
        Ok(ArtifactCoordinates::Nuget(NugetArtifactCoordinates {
            uuid: reader.uuid()?,
            id: reader.string("id")?,
            version: reader.string("version")?,
            extension: reader.string("extension")?,
        }))
    }

    fn unfold(&self, entity: &ArtifactCoordinates) -> Result<VertexWrite> {
        let ArtifactCoordinates::Nuget(c) = entity else {
            return Err(mismatch(NUGET, entity));
        };
        Ok(VertexWrite::new(NUGET, &c.uuid)
            .property("id", c.id.as_str())
            .property("version", c.version.as_str())
            .property("extension", c.extension.as_str()))
    }
}

pub struct RawCoordinatesAdapter;

impl LeafAdapter<ArtifactCoordinates> for RawCoordinatesAdapter {
    fn label(&self) -> &'static str {
        RAW
    }

    fn supertype(&self) -> Option<&'static str> {
        Some(GENERIC)
    }

    fn materialize(&self, vertex: &Vertex) -> Result<ArtifactCoordinates> {
        let reader = PropertyReader::new(vertex);
        Ok(ArtifactCoordinates::Raw(RawArtifactCoordinates {
            uuid: reader.uuid()?,
            path: reader.string("path")?,
        }))
    }

    fn unfold(&self, entity: &ArtifactCoordinates) -> Result<VertexWrite> {
        let ArtifactCoordinates::Raw(c) = entity else {
            return Err(mismatch(RAW, entity));
        };
        Ok(VertexWrite::new(RAW, &c.uuid).property("path", c.path.as_str()))
    }
}

pub fn coordinates_adapters() -> Vec<BoxedAdapter<ArtifactCoordinates>> {
    vec![
        Box::new(GenericCoordinatesAdapter),
        Box::new(MavenCoordinatesAdapter),
        Box::new(MavenPluginCoordinatesAdapter),
        Box::new(NpmCoordinatesAdapter),
        Box::new(NugetCoordinatesAdapter),
        Box::new(RawCoordinatesAdapter),
    ]
}

pub fn coordinates_registry() -> Result<AdapterRegistry<ArtifactCoordinates>> {
    AdapterRegistry::new(coordinates_adapters())
}

/// Hierarchy adapter over all artifact coordinate layouts.
pub fn artifact_coordinates_adapter(max_depth: usize) -> Result<ArtifactCoordinatesAdapter> {
    Ok(EntityUpwardHierarchyAdapter::new(
        coordinates_registry()?,
        max_depth,
    ))
}

#[cfg(test)]
mod tests {
    use strongbox_graph::{GraphStore, GraphStoreMut, MemoryGraph, Properties, UUID_PROPERTY};

    use super::*;
    use crate::entity::Hierarchy;

    fn generic(uuid: &str) -> ArtifactCoordinates {
        ArtifactCoordinates::Generic(GenericArtifactCoordinates {
            uuid: uuid.into(),
            version: Some("3.9.6".into()),
            coordinates: BTreeMap::from([
                ("groupId".to_string(), "org.apache.maven.plugins".to_string()),
                ("artifactId".to_string(), "maven-clean-plugin".to_string()),
            ]),
        })
    }

    fn plugin_chain(uuid: &str) -> Hierarchy<ArtifactCoordinates> {
        Hierarchy::root(generic(uuid))
            .with_child(ArtifactCoordinates::Maven(MavenArtifactCoordinates {
                uuid: uuid.into(),
                group_id: "org.apache.maven.plugins".into(),
                artifact_id: "maven-clean-plugin".into(),
                version: "3.9.6".into(),
                classifier: None,
                extension: "jar".into(),
            }))
            .with_child(ArtifactCoordinates::MavenPlugin(MavenPluginCoordinates {
                uuid: uuid.into(),
                goal_prefix: "clean".into(),
            }))
    }

    #[test]
    fn test_registry_order() {
        let registry = coordinates_registry().unwrap();

        assert_eq!(
            registry.labels(),
            vec![MAVEN_PLUGIN, MAVEN, NPM, NUGET, RAW, GENERIC]
        );
        assert_eq!(registry.root().label(), GENERIC);
    }

    #[test]
    fn test_plugin_chain_round_trip() {
        let adapter = artifact_coordinates_adapter(5).unwrap();
        let chain = plugin_chain("p-1");
        let mut graph = MemoryGraph::new();

        let leaf = adapter.unfold(&chain).unwrap().execute(&mut graph).unwrap();
        assert_eq!(graph.vertex(leaf).unwrap().label, MAVEN_PLUGIN);

        let folded = adapter.fold().execute(&graph, leaf).unwrap();
        assert_eq!(folded, chain);
    }

    #[test]
    fn test_generic_coordinates_keep_separators() {
        let adapter = artifact_coordinates_adapter(5).unwrap();
        let chain = Hierarchy::root(ArtifactCoordinates::Generic(GenericArtifactCoordinates {
            uuid: "g-1".into(),
            version: None,
            coordinates: BTreeMap::from([
                ("a=b".to_string(), "c".to_string()),
                ("query".to_string(), "x=1&y=2".to_string()),
            ]),
        }));
        let mut graph = MemoryGraph::new();

        let root = adapter.unfold(&chain).unwrap().execute(&mut graph).unwrap();
        let stored = graph.vertex(root).unwrap();
        assert_eq!(
            stored.property(COORDINATE_KEYS).unwrap().as_list().unwrap(),
            ["a=b".to_string(), "query".to_string()]
        );

        assert_eq!(adapter.fold().execute(&graph, root).unwrap(), chain);
    }

    #[test]
    fn test_generic_rejects_unaligned_coordinates() {
        let mut properties = Properties::new();
        properties.insert(UUID_PROPERTY.into(), "g-1".into());
        properties.insert(COORDINATE_KEYS.into(), vec!["groupId".to_string()].into());
        let mut graph = MemoryGraph::new();
        let id = graph.insert_vertex(GENERIC, properties);

        assert!(matches!(
            GenericCoordinatesAdapter.materialize(graph.vertex(id).unwrap()),
            Err(DbError::InvalidProperty { key, .. }) if key == COORDINATE_VALUES
        ));
    }

    #[test]
    fn test_null_optional_round_trips() {
        let adapter = artifact_coordinates_adapter(5).unwrap();
        let chain = Hierarchy::root(ArtifactCoordinates::Generic(GenericArtifactCoordinates {
            uuid: "n-1".into(),
            ..Default::default()
        }))
        .with_child(ArtifactCoordinates::Npm(NpmArtifactCoordinates {
            uuid: "n-1".into(),
            scope: None,
            name: "left-pad".into(),
            version: "1.3.0".into(),
            extension: "tgz".into(),
        }));
        let mut graph = MemoryGraph::new();

        let leaf = adapter.unfold(&chain).unwrap().execute(&mut graph).unwrap();
        assert_eq!(adapter.fold().execute(&graph, leaf).unwrap(), chain);
    }

    #[test]
    fn test_adapter_rejects_other_variant() {
        let raw = ArtifactCoordinates::Raw(RawArtifactCoordinates {
            uuid: "r-1".into(),
            path: "a/b".into(),
        });

        assert!(matches!(
            NugetCoordinatesAdapter.unfold(&raw),
            Err(DbError::EntityMismatch { adapter, found }) if adapter == NUGET && found == RAW
        ));
    }
}
