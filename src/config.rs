use crate::catalog::{self, CatalogKind};
use crate::project::{Project, TopologyBuilder};
use crate::topology::{BaseBox, Host, Network, Router};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Component, Path};

/// Project file: the records of one topology, in the order they were added
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub hosts: Vec<HostConfig>,
    #[serde(default)]
    pub routers: Vec<RouterConfig>,
    #[serde(default)]
    pub networks: Vec<NetworkConfig>,
    #[serde(default)]
    pub net_mappings: Vec<NetMappingConfig>,
    #[serde(default)]
    pub router_mappings: Vec<RouterMappingConfig>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    #[serde(default)]
    pub containers: Vec<ContainerConfig>,
    #[serde(default)]
    pub container_mappings: Vec<ContainerMappingConfig>,
}

/// Host entry; image, flavor and man_user fall back to the catalog defaults
#[derive(Debug, Serialize, Deserialize)]
pub struct HostConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub man_user: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub docker: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouterConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub man_user: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub cidr: String,
    #[serde(default)]
    pub accessible_by_user: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NetMappingConfig {
    pub host: String,
    pub network: String,
    #[serde(deserialize_with = "scalar_string")]
    pub last_octet: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouterMappingConfig {
    pub router: String,
    pub network: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    #[serde(default)]
    pub hosts: Vec<String>,
}

/// Container entry; a non-empty `dockerfile` wins over `image`
#[derive(Debug, Serialize, Deserialize)]
pub struct ContainerConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContainerMappingConfig {
    pub container: String,
    pub host: String,
    #[serde(deserialize_with = "scalar_string")]
    pub port: String,
}

/// Accept a YAML string or integer and keep it as text.
///
/// Floats are refused: their source spelling is gone once parsed, so
/// `5.0` would silently turn into `5`. Quote such values instead.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => Ok(s),
        Scalar::Integer(n) => Ok(n.to_string()),
        Scalar::Float(f) => Err(de::Error::custom(format!(
            "expected a string or an integer, found the number {:?}; quote it to keep it as text",
            f
        ))),
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Topology name cannot be empty")]
    EmptyTopologyName,
    #[error("Topology name '{0}' must be a single directory name")]
    InvalidTopologyName(String),
    #[error("Missing required field '{field}' in {record}")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },
    #[error("Add hosts and networks before mapping hosts to networks")]
    NoHostsOrNetworks,
    #[error("Add routers and networks before mapping routers to networks")]
    NoRoutersOrNetworks,
    #[error("Group '{0}' has no hosts")]
    EmptyGroup(String),
    #[error("{record} '{value}' must be a path inside the topology directory")]
    UnsafePath {
        record: &'static str,
        value: String,
    },
}

fn is_single_dir_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Check that a topology name can serve as its own output directory
pub fn validate_topology_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyTopologyName);
    }
    if !is_single_dir_name(name) {
        return Err(ValidationError::InvalidTopologyName(name.to_string()));
    }
    Ok(())
}

/// Check that a host name is a single directory name; it names the host's
/// role directory
pub fn validate_host_name(name: &str) -> Result<(), ValidationError> {
    if !is_single_dir_name(name) {
        return Err(ValidationError::UnsafePath {
            record: "host",
            value: name.to_string(),
        });
    }
    Ok(())
}

/// Check that a dockerfile folder is a relative path made only of plain
/// directory names
pub fn validate_dockerfile_path(path: &str) -> Result<(), ValidationError> {
    let mut components = Path::new(path).components().peekable();
    let plain = components.peek().is_some()
        && components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if plain {
        Ok(())
    } else {
        Err(ValidationError::UnsafePath {
            record: "dockerfile",
            value: path.to_string(),
        })
    }
}

impl ProjectConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_topology_name(self.name.trim())
    }

    /// Replay every record through a [`TopologyBuilder`], in file order.
    ///
    /// Hosts, routers and networks go first so mappings can see them, then
    /// mappings, groups, containers and container mappings.
    pub fn into_project(self) -> Result<Project, ValidationError> {
        self.validate()?;
        let mut builder = TopologyBuilder::new(self.name.trim());

        for host in self.hosts {
            builder.add_host(Host {
                name: host.name.trim().to_string(),
                base_box: BaseBox {
                    image: catalog::resolve(CatalogKind::Image, host.image.as_deref()),
                    man_user: catalog::resolve(CatalogKind::ManagementUser, host.man_user.as_deref()),
                },
                flavor: catalog::resolve(CatalogKind::Flavor, host.flavor.as_deref()),
                hidden: host.hidden,
                docker: host.docker,
            })?;
        }
        for router in self.routers {
            builder.add_router(Router {
                name: router.name.trim().to_string(),
                base_box: BaseBox {
                    image: catalog::resolve(CatalogKind::Image, router.image.as_deref()),
                    man_user: catalog::resolve(CatalogKind::ManagementUser, router.man_user.as_deref()),
                },
                flavor: catalog::resolve(CatalogKind::Flavor, router.flavor.as_deref()),
            });
        }
        for network in self.networks {
            builder.add_network(Network {
                name: network.name.trim().to_string(),
                cidr: network.cidr.trim().to_string(),
                accessible_by_user: network.accessible_by_user,
            });
        }
        for mapping in &self.net_mappings {
            builder.add_network_mapping(&mapping.host, &mapping.network, &mapping.last_octet)?;
        }
        for mapping in &self.router_mappings {
            builder.add_router_mapping(&mapping.router, &mapping.network)?;
        }
        for group in self.groups {
            let hosts = group.hosts.iter().map(|h| h.trim().to_string()).collect();
            builder.add_group(&group.name, hosts)?;
        }
        for container in &self.containers {
            builder.add_container(
                &container.name,
                container.image.as_deref().unwrap_or_default(),
                container.dockerfile.as_deref().unwrap_or_default(),
            )?;
        }
        for mapping in &self.container_mappings {
            builder.add_container_mapping(&mapping.container, &mapping.host, &mapping.port)?;
        }

        Ok(builder.finish())
    }
}
