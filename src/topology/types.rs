//! Topology record definitions.
//!
//! These structures are serialized directly into `topology.yml`. Field
//! declaration order is the order keys appear in the output, so do not
//! reorder fields casually.

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Image and management account of a sandbox machine
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BaseBox {
    /// Image name (e.g., "debian-12.7")
    pub image: String,
    /// Management user baked into the image
    pub man_user: String,
}

/// A host machine in the sandbox.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub name: String,
    pub base_box: BaseBox,
    pub flavor: String,
    /// Hidden from the trainee; only written when true
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Host may run containers from `containers.yml`
    #[serde(default)]
    pub docker: bool,
}

/// A router connecting sandbox networks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Router {
    pub name: String,
    pub base_box: BaseBox,
    pub flavor: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub name: String,
    /// Network address block, e.g. "10.10.30.0/24"
    pub cidr: String,
    pub accessible_by_user: bool,
}

/// Attachment of a host to a network
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetMapping {
    pub host: String,
    pub network: String,
    pub ip: String,
}

/// Attachment of a router to a network
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RouterMapping {
    pub router: String,
    pub network: String,
    pub ip: String,
}

/// A named set of hosts.
///
/// Collected as `hosts`, written as `nodes`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    #[serde(rename = "nodes")]
    pub hosts: Vec<String>,
}

/// Root of `topology.yml`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    pub name: String,
    pub hosts: Vec<Host>,
    pub routers: Vec<Router>,
    pub networks: Vec<Network>,
    pub net_mappings: Vec<NetMapping>,
    pub router_mappings: Vec<RouterMapping>,
    pub groups: Vec<Group>,
}

impl Topology {
    /// First network registered under `name`
    pub fn find_network(&self, name: &str) -> Option<&Network> {
        self.networks.iter().find(|n| n.name == name)
    }

    /// Names of hosts flagged as docker hosts, in insertion order
    pub fn docker_hosts(&self) -> Vec<&str> {
        self.hosts
            .iter()
            .filter(|h| h.docker)
            .map(|h| h.name.as_str())
            .collect()
    }
}
