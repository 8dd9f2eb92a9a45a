//! # Topogen - Topology generator for cyber-range sandboxes
//!
//! This library turns a list of sandbox records (hosts, routers, networks,
//! address mappings, groups and containers) into the files a sandbox
//! definition repository expects: `topology.yml`, an optional
//! `containers.yml`, and a provisioning skeleton with one Ansible role
//! directory per host.
//!
//! ## Architecture
//!
//! - `config`: Project file structures and validation errors
//! - `config_loader`: Project file loading
//! - `project`: Incremental builder applying the per-record checks
//! - `topology`: Topology records and YAML projection
//! - `containers`: Container records and the `containers.yml` writer
//! - `scaffold`: Directory layout and the static requirements file
//! - `workspace`: Importing and removing user files in a generated tree
//! - `catalog`: Known images, flavors and management users
//! - `utils`: Address derivation and port coercion
//! - `orchestrator`: A full generate run
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use topogen::{config_loader, orchestrator};
//!
//! let project = config_loader::load_project(Path::new("project.yml"))?;
//! let report = orchestrator::generate_project(&project, Path::new("."))?;
//! println!("{}", report.topology_file.display());
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Project File Format
//!
//! ```yaml
//! name: web-lab
//! hosts:
//!   - name: attacker
//!     image: kali
//!     flavor: standard.medium
//!     man_user: debian
//!     hidden: false
//!   - name: server
//!     image: debian-12.7
//!     docker: true
//! routers:
//!   - name: gw
//! networks:
//!   - name: lan
//!     cidr: 10.10.30.0/24
//!     accessible_by_user: true
//! net_mappings:
//!   - host: attacker
//!     network: lan
//!     last_octet: 10
//! router_mappings:
//!   - router: gw
//!     network: lan
//! groups:
//!   - name: red
//!     hosts: [attacker]
//! containers:
//!   - name: web
//!     dockerfile: docker/web
//! container_mappings:
//!   - container: web
//!     host: server
//!     port: 8080
//! ```
//!
//! ## Error Handling
//!
//! Public functions return `color_eyre::Result`. Record-level problems are
//! reported as [`config::ValidationError`] and filesystem refusals as
//! [`workspace::WorkspaceError`]; both can be recovered with `downcast_ref`.

pub mod catalog;
pub mod config;
pub mod config_loader;
pub mod containers;
pub mod orchestrator;
pub mod project;
pub mod scaffold;
pub mod topology;
pub mod utils;
pub mod workspace;
