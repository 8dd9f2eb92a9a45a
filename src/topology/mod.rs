//! Sandbox topology model and its YAML projection.
//!
//! The document written to `topology.yml` has the keys `name`, `hosts`,
//! `routers`, `networks`, `net_mappings`, `router_mappings` and `groups`,
//! in that order. Records keep insertion order, a host's `hidden` key only
//! appears when set, and groups list their members under `nodes`.
//!
//! ```yaml
//! name: demo
//! hosts:
//! - name: attacker
//!   base_box:
//!     image: kali
//!     man_user: debian
//!   flavor: standard.medium
//!   hidden: true
//!   docker: false
//! routers: []
//! networks:
//! - name: lan
//!   cidr: 10.1.2.0/24
//!   accessible_by_user: true
//! net_mappings:
//! - host: attacker
//!   network: lan
//!   ip: 10.1.2.10
//! router_mappings: []
//! groups: []
//! ```

pub mod types;

pub use types::{BaseBox, Group, Host, NetMapping, Network, Router, RouterMapping, Topology};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;

/// File name of the topology description inside a topology directory
pub const TOPOLOGY_FILE: &str = "topology.yml";

/// Serialize a topology to YAML.
///
/// Output depends only on the records and their order, so identical input
/// always yields identical bytes.
pub fn generate_topology(topology: &Topology) -> Result<String> {
    serde_yaml::to_string(topology)
        .wrap_err_with(|| format!("Failed to serialize topology '{}'", topology.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(name: &str, hidden: bool) -> Host {
        Host {
            name: name.to_string(),
            base_box: BaseBox {
                image: "kali".to_string(),
                man_user: "debian".to_string(),
            },
            flavor: "standard.medium".to_string(),
            hidden,
            docker: false,
        }
    }

    #[test]
    fn test_hidden_key_only_when_set() {
        let topology = Topology {
            name: "demo".to_string(),
            hosts: vec![host("visible", false), host("secret", true)],
            ..Default::default()
        };
        let yaml = generate_topology(&topology).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let hosts = value["hosts"].as_sequence().unwrap();

        assert!(hosts[0].get("hidden").is_none());
        assert_eq!(hosts[1]["hidden"], serde_yaml::Value::Bool(true));
        assert_eq!(yaml.matches("hidden").count(), 1);
    }

    #[test]
    fn test_full_document_layout() {
        let topology = Topology {
            name: "demo".to_string(),
            hosts: vec![host("attacker", true)],
            routers: vec![Router {
                name: "gw".to_string(),
                base_box: BaseBox {
                    image: "debian-12.7".to_string(),
                    man_user: "debian".to_string(),
                },
                flavor: "m1.small".to_string(),
            }],
            networks: vec![Network {
                name: "lan".to_string(),
                cidr: "10.1.2.0/24".to_string(),
                accessible_by_user: true,
            }],
            net_mappings: vec![NetMapping {
                host: "attacker".to_string(),
                network: "lan".to_string(),
                ip: "10.1.2.10".to_string(),
            }],
            router_mappings: vec![RouterMapping {
                router: "gw".to_string(),
                network: "lan".to_string(),
                ip: "10.1.2.1".to_string(),
            }],
            groups: vec![Group {
                name: "red".to_string(),
                hosts: vec!["attacker".to_string()],
            }],
        };

        let expected = "\
name: demo
hosts:
- name: attacker
  base_box:
    image: kali
    man_user: debian
  flavor: standard.medium
  hidden: true
  docker: false
routers:
- name: gw
  base_box:
    image: debian-12.7
    man_user: debian
  flavor: m1.small
networks:
- name: lan
  cidr: 10.1.2.0/24
  accessible_by_user: true
net_mappings:
- host: attacker
  network: lan
  ip: 10.1.2.10
router_mappings:
- router: gw
  network: lan
  ip: 10.1.2.1
groups:
- name: red
  nodes:
  - attacker
";
        assert_eq!(generate_topology(&topology).unwrap(), expected);
    }

    #[test]
    fn test_empty_lists() {
        let topology = Topology {
            name: "empty".to_string(),
            ..Default::default()
        };
        let yaml = generate_topology(&topology).unwrap();
        assert_eq!(
            yaml,
            "name: empty\nhosts: []\nrouters: []\nnetworks: []\nnet_mappings: []\nrouter_mappings: []\ngroups: []\n"
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let topology = Topology {
            name: "demo".to_string(),
            hosts: vec![host("b", false), host("a", true), host("c", false)],
            ..Default::default()
        };
        let first = generate_topology(&topology).unwrap();
        let second = generate_topology(&topology.clone()).unwrap();
        assert_eq!(first, second);
        // Insertion order, not alphabetical
        assert!(first.find("name: b").unwrap() < first.find("name: a").unwrap());
    }

    #[test]
    fn test_docker_hosts() {
        let mut topology = Topology::default();
        topology.hosts.push(host("a", false));
        let mut docker = host("b", false);
        docker.docker = true;
        topology.hosts.push(docker);
        assert_eq!(topology.docker_hosts(), vec!["b"]);
    }
}
