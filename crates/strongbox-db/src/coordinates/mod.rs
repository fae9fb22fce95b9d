//! Artifact coordinates: the entity family stored by the artifact repository.
//!
//! Every layout's coordinates extend [`GenericArtifactCoordinates`], and Maven plugin
//! coordinates further extend Maven's. One logical artifact is a chain of these sharing
//! a uuid, root first.

mod adapters;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use adapters::{
    artifact_coordinates_adapter, coordinates_adapters, coordinates_registry,
    ArtifactCoordinatesAdapter, GenericCoordinatesAdapter, MavenCoordinatesAdapter,
    MavenPluginCoordinatesAdapter, NpmCoordinatesAdapter, NugetCoordinatesAdapter,
    RawCoordinatesAdapter,
};

use crate::entity::HierarchyEntity;

pub const GENERIC: &str = "GenericArtifactCoordinates";
pub const MAVEN: &str = "MavenArtifactCoordinates";
pub const MAVEN_PLUGIN: &str = "MavenPluginCoordinates";
pub const NPM: &str = "NpmArtifactCoordinates";
pub const NUGET: &str = "NugetArtifactCoordinates";
pub const RAW: &str = "RawArtifactCoordinates";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericArtifactCoordinates {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub coordinates: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenArtifactCoordinates {
    pub uuid: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default = "default_jar")]
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenPluginCoordinates {
    pub uuid: String,
    pub goal_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpmArtifactCoordinates {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub name: String,
    pub version: String,
    #[serde(default = "default_tgz")]
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NugetArtifactCoordinates {
    pub uuid: String,
    pub id: String,
    pub version: String,
    #[serde(default = "default_nupkg")]
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArtifactCoordinates {
    pub uuid: String,
    pub path: String,
}

fn default_jar() -> String {
    "jar".into()
}

fn default_tgz() -> String {
    "tgz".into()
}

fn default_nupkg() -> String {
    "nupkg".into()
}

/// One level of an artifact's coordinates chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ArtifactCoordinates {
    Generic(GenericArtifactCoordinates),
    Maven(MavenArtifactCoordinates),
    MavenPlugin(MavenPluginCoordinates),
    Npm(NpmArtifactCoordinates),
    Nuget(NugetArtifactCoordinates),
    Raw(RawArtifactCoordinates),
}

impl ArtifactCoordinates {
    /// Repository-relative path of the artifact, for layouts that define one.
    pub fn path(&self) -> Option<String> {
        match self {
            ArtifactCoordinates::Maven(c) => Some(c.path()),
            ArtifactCoordinates::Npm(c) => Some(c.path()),
            ArtifactCoordinates::Nuget(c) => Some(c.path()),
            ArtifactCoordinates::Raw(c) => Some(c.path.clone()),
            ArtifactCoordinates::Generic(_) | ArtifactCoordinates::MavenPlugin(_) => None,
        }
    }
}

impl MavenArtifactCoordinates {
    pub fn path(&self) -> String {
        let file = match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, classifier, self.extension
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, self.extension),
        };
        format!(
            "{}/{}/{}/{}",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            file
        )
    }
}

impl NpmArtifactCoordinates {
    pub fn path(&self) -> String {
        let package = match &self.scope {
            Some(scope) => format!("{}/{}", scope, self.name),
            None => self.name.clone(),
        };
        format!(
            "{}/-/{}-{}.{}",
            package, self.name, self.version, self.extension
        )
    }
}

impl NugetArtifactCoordinates {
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}.{}.{}",
            self.id, self.version, self.id, self.version, self.extension
        )
    }
}

impl HierarchyEntity for ArtifactCoordinates {
    fn kind(&self) -> &'static str {
        match self {
            ArtifactCoordinates::Generic(_) => GENERIC,
            ArtifactCoordinates::Maven(_) => MAVEN,
            ArtifactCoordinates::MavenPlugin(_) => MAVEN_PLUGIN,
            ArtifactCoordinates::Npm(_) => NPM,
            ArtifactCoordinates::Nuget(_) => NUGET,
            ArtifactCoordinates::Raw(_) => RAW,
        }
    }

    fn uuid(&self) -> &str {
        match self {
            ArtifactCoordinates::Generic(c) => &c.uuid,
            ArtifactCoordinates::Maven(c) => &c.uuid,
            ArtifactCoordinates::MavenPlugin(c) => &c.uuid,
            ArtifactCoordinates::Npm(c) => &c.uuid,
            ArtifactCoordinates::Nuget(c) => &c.uuid,
            ArtifactCoordinates::Raw(c) => &c.uuid,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_tagged_json_shape() {
        let coordinates: Vec<ArtifactCoordinates> = serde_json::from_value(json!([
            { "type": "generic", "uuid": "a-1", "version": "1.0" },
            {
                "type": "maven",
                "uuid": "a-1",
                "groupId": "org.carlspring",
                "artifactId": "strongbox",
                "version": "1.0"
            },
            { "type": "maven-plugin", "uuid": "a-1", "goalPrefix": "sb" }
        ]))
        .unwrap();

        assert_eq!(coordinates[0].kind(), GENERIC);
        assert_eq!(coordinates[2].kind(), MAVEN_PLUGIN);
        let ArtifactCoordinates::Maven(maven) = &coordinates[1] else {
            panic!("expected maven coordinates");
        };
        assert_eq!(maven.extension, "jar");
        assert_eq!(maven.classifier, None);
        assert!(coordinates.iter().all(|c| c.uuid() == "a-1"));
    }

    #[test]
    fn test_layout_paths() {
        let maven = MavenArtifactCoordinates {
            uuid: "m".into(),
            group_id: "org.carlspring.strongbox".into(),
            artifact_id: "strongbox-db".into(),
            version: "1.2".into(),
            classifier: Some("sources".into()),
            extension: "jar".into(),
        };
        assert_eq!(
            maven.path(),
            "org/carlspring/strongbox/strongbox-db/1.2/strongbox-db-1.2-sources.jar"
        );

        let npm = ArtifactCoordinates::Npm(NpmArtifactCoordinates {
            uuid: "n".into(),
            scope: Some("@types".into()),
            name: "node".into(),
            version: "20.1.0".into(),
            extension: "tgz".into(),
        });
        assert_eq!(npm.path().as_deref(), Some("@types/node/-/node-20.1.0.tgz"));

        let nuget = NugetArtifactCoordinates {
            uuid: "g".into(),
            id: "Newtonsoft.Json".into(),
            version: "13.0.1".into(),
            extension: "nupkg".into(),
        };
        assert_eq!(
            nuget.path(),
            "Newtonsoft.Json/13.0.1/Newtonsoft.Json.13.0.1.nupkg"
        );

        let generic = ArtifactCoordinates::Generic(GenericArtifactCoordinates::default());
        assert_eq!(generic.path(), None);
    }
}
