//! Generation orchestrator.
//!
//! Coordinates a full generate run: topology file, role scaffold,
//! requirements, dockerfile folders and, when there are any containers,
//! `containers.yml`.

use crate::config::{validate_dockerfile_path, validate_topology_name};
use crate::containers::{save_containers, Container};
use crate::project::Project;
use crate::scaffold::{create_dockerfile_dirs, save_topology, PROVISIONING_DIR, REQUIREMENTS_FILE};
use color_eyre::Result;
use log::info;
use std::path::{Path, PathBuf};

/// Paths written by [`generate_project`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// `<output_root>/<name>`
    pub base_dir: PathBuf,
    pub topology_file: PathBuf,
    pub requirements_file: PathBuf,
    pub containers_file: Option<PathBuf>,
    pub dockerfile_dirs: Vec<PathBuf>,
}

/// Generate the complete topology directory for `project` under
/// `output_root`.
pub fn generate_project(project: &Project, output_root: &Path) -> Result<GenerationReport> {
    validate_topology_name(project.name())?;
    for dockerfile in project.containers.iter().filter_map(Container::dockerfile) {
        validate_dockerfile_path(dockerfile)?;
    }

    let topology_file = save_topology(output_root, &project.topology)?;
    let base_dir = output_root.join(project.name());

    let dockerfile_dirs = create_dockerfile_dirs(&base_dir, &project.containers)?;

    let containers_file = if project.has_containers() {
        Some(save_containers(&base_dir, &project.containers, &project.container_mappings)?)
    } else {
        None
    };

    let report = GenerationReport {
        requirements_file: base_dir.join(PROVISIONING_DIR).join(REQUIREMENTS_FILE),
        base_dir,
        topology_file,
        containers_file,
        dockerfile_dirs,
    };
    info!("Generated topology '{}' in {:?}", project.name(), report.base_dir);
    Ok(report)
}
