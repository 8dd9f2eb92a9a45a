//! Project assembly.
//!
//! A [`TopologyBuilder`] accumulates records one at a time, applying the same
//! checks an operator gets when adding entries by hand: mappings need hosts
//! (or routers) and networks to exist first, groups need a name and at least
//! one host, container mappings need a container, host and port. Beyond that
//! nothing is validated. Names are not required to be unique and references
//! between lists are not resolved, except that mapping addresses are derived
//! from the first network with a matching name.

use crate::config::{validate_dockerfile_path, validate_host_name, ValidationError};
use crate::containers::{Container, ContainerMapping};
use crate::topology::{Group, Host, NetMapping, Network, Router, RouterMapping, Topology};
use crate::utils::ip_utils::{derive_ip, placeholder_ip, ROUTER_LAST_OCTET};
use log::{debug, warn};

/// Everything a generate run writes out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub topology: Topology,
    pub containers: Vec<Container>,
    pub container_mappings: Vec<ContainerMapping>,
}

impl Project {
    pub fn name(&self) -> &str {
        &self.topology.name
    }

    /// Whether `containers.yml` should be written
    pub fn has_containers(&self) -> bool {
        !self.containers.is_empty() || !self.container_mappings.is_empty()
    }
}

/// Incremental builder for a [`Project`].
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    project: Project,
}

fn require(value: &str, record: &'static str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField { record, field });
    }
    Ok(value.to_string())
}

impl TopologyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let mut builder = Self::default();
        builder.project.topology.name = name.into();
        builder
    }

    pub fn topology(&self) -> &Topology {
        &self.project.topology
    }

    /// Add a host. Its name becomes the role directory name, so it must be
    /// a single directory name.
    pub fn add_host(&mut self, host: Host) -> Result<(), ValidationError> {
        validate_host_name(&host.name)?;
        debug!("Adding host '{}' ({})", host.name, host.base_box.image);
        self.project.topology.hosts.push(host);
        Ok(())
    }

    pub fn add_router(&mut self, router: Router) {
        debug!("Adding router '{}' ({})", router.name, router.base_box.image);
        self.project.topology.routers.push(router);
    }

    pub fn add_network(&mut self, network: Network) {
        debug!("Adding network '{}' ({})", network.name, network.cidr);
        self.project.topology.networks.push(network);
    }

    /// Attach a host to a network at `<cidr prefix>.<last_octet>`.
    ///
    /// If the network is unknown or its CIDR is too short to supply a
    /// prefix, the address keeps the `?.?.?.` placeholder.
    pub fn add_network_mapping(
        &mut self,
        host: &str,
        network: &str,
        last_octet: &str,
    ) -> Result<(), ValidationError> {
        let topology = &self.project.topology;
        if topology.hosts.is_empty() || topology.networks.is_empty() {
            return Err(ValidationError::NoHostsOrNetworks);
        }
        let host = require(host, "net mapping", "host")?;
        let network = require(network, "net mapping", "network")?;
        let last_octet = require(last_octet, "net mapping", "last_octet")?;

        let ip = self.mapping_ip(&network, &last_octet);
        let mapping = NetMapping { host, network, ip };
        debug!("Mapping host '{}' -> {} at {}", mapping.host, mapping.network, mapping.ip);
        self.project.topology.net_mappings.push(mapping);
        Ok(())
    }

    /// Attach a router to a network; routers always take `.1`.
    pub fn add_router_mapping(
        &mut self,
        router: &str,
        network: &str,
    ) -> Result<(), ValidationError> {
        let topology = &self.project.topology;
        if topology.routers.is_empty() || topology.networks.is_empty() {
            return Err(ValidationError::NoRoutersOrNetworks);
        }
        let router = require(router, "router mapping", "router")?;
        let network = require(network, "router mapping", "network")?;

        let ip = self.mapping_ip(&network, ROUTER_LAST_OCTET);
        let mapping = RouterMapping { router, network, ip };
        debug!("Mapping router '{}' -> {} at {}", mapping.router, mapping.network, mapping.ip);
        self.project.topology.router_mappings.push(mapping);
        Ok(())
    }

    fn mapping_ip(&self, network: &str, last_octet: &str) -> String {
        let derived = self
            .project
            .topology
            .find_network(network)
            .and_then(|n| derive_ip(&n.cidr, last_octet));
        match derived {
            Some(ip) => ip,
            None => {
                warn!(
                    "Network '{}' is unknown or has no usable CIDR prefix; using placeholder address",
                    network
                );
                placeholder_ip(last_octet)
            }
        }
    }

    /// Add a named group. Host names are taken as given.
    pub fn add_group(&mut self, name: &str, hosts: Vec<String>) -> Result<(), ValidationError> {
        let name = require(name, "group", "name")?;
        if hosts.is_empty() {
            return Err(ValidationError::EmptyGroup(name));
        }
        self.project.topology.groups.push(Group { name, hosts });
        Ok(())
    }

    /// Add a container; a non-empty `dockerfile` takes precedence over `image`.
    ///
    /// The dockerfile folder is created under the topology directory, so it
    /// must be a relative path without `..`.
    pub fn add_container(
        &mut self,
        name: &str,
        image: &str,
        dockerfile: &str,
    ) -> Result<(), ValidationError> {
        let name = require(name, "container", "name")?;
        let container = Container::new(name, image, dockerfile);
        if let Some(path) = container.dockerfile() {
            validate_dockerfile_path(path)?;
        }
        self.project.containers.push(container);
        Ok(())
    }

    pub fn add_container_mapping(
        &mut self,
        container: &str,
        host: &str,
        port: &str,
    ) -> Result<(), ValidationError> {
        let container = require(container, "container mapping", "container")?;
        let host = require(host, "container mapping", "host")?;
        let port = require(port, "container mapping", "port")?;
        self.project.container_mappings.push(ContainerMapping { container, host, port });
        Ok(())
    }

    /// Hosts eligible for container placement
    pub fn docker_hosts(&self) -> Vec<&str> {
        self.project.topology.docker_hosts()
    }

    pub fn finish(self) -> Project {
        self.project
    }
}
