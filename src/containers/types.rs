//! Container record definitions for `containers.yml`.

use crate::utils::PortValue;
use serde::{Deserialize, Serialize};

/// Where a container's image comes from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContainerSource {
    /// Prebuilt image name
    Image(String),
    /// Folder (relative to the topology directory) holding a Dockerfile
    Dockerfile(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    #[serde(flatten)]
    pub source: ContainerSource,
}

impl Container {
    /// Build a container, picking the dockerfile variant whenever a
    /// non-empty dockerfile path is given.
    pub fn new(name: impl Into<String>, image: &str, dockerfile: &str) -> Self {
        let dockerfile = dockerfile.trim();
        let source = if dockerfile.is_empty() {
            ContainerSource::Image(image.trim().to_string())
        } else {
            ContainerSource::Dockerfile(dockerfile.to_string())
        };
        Self {
            name: name.into(),
            source,
        }
    }

    pub fn dockerfile(&self) -> Option<&str> {
        match &self.source {
            ContainerSource::Dockerfile(path) => Some(path),
            ContainerSource::Image(_) => None,
        }
    }
}

/// Placement of a container on a docker host.
///
/// The port is kept as entered; coercion happens on export.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContainerMapping {
    pub container: String,
    pub host: String,
    pub port: String,
}

/// Export form of [`ContainerMapping`] with the port coerced.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportedContainerMapping<'a> {
    pub container: &'a str,
    pub host: &'a str,
    pub port: PortValue,
}

impl<'a> From<&'a ContainerMapping> for ExportedContainerMapping<'a> {
    fn from(mapping: &'a ContainerMapping) -> Self {
        Self {
            container: &mapping.container,
            host: &mapping.host,
            port: PortValue::coerce(&mapping.port),
        }
    }
}

/// Root of `containers.yml`
#[derive(Serialize, Debug)]
pub struct ContainersDocument<'a> {
    pub containers: &'a [Container],
    pub container_mappings: Vec<ExportedContainerMapping<'a>>,
}
