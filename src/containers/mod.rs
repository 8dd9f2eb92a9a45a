//! Container definitions and the `containers.yml` writer.
//!
//! Containers run on hosts flagged as docker hosts. Each one is built either
//! from an image name or from a Dockerfile folder inside the topology
//! directory. Mapping ports are collected as text and written as YAML
//! integers whenever they parse as one.

pub mod types;

pub use types::{Container, ContainerMapping, ContainerSource, ContainersDocument, ExportedContainerMapping};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the container description inside a topology directory
pub const CONTAINERS_FILE: &str = "containers.yml";

/// Render `containers.yml` content.
pub fn render_containers(containers: &[Container], mappings: &[ContainerMapping]) -> Result<String> {
    let document = ContainersDocument {
        containers,
        container_mappings: mappings.iter().map(ExportedContainerMapping::from).collect(),
    };
    serde_yaml::to_string(&document).wrap_err("Failed to serialize containers document")
}

/// Write `containers.yml` into `base_dir` and return its path.
pub fn save_containers(
    base_dir: &Path,
    containers: &[Container],
    mappings: &[ContainerMapping],
) -> Result<PathBuf> {
    let content = render_containers(containers, mappings)?;
    let path = base_dir.join(CONTAINERS_FILE);
    fs::write(&path, content)
        .wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
    info!(
        "Wrote {} containers and {} mappings to {:?}",
        containers.len(),
        mappings.len(),
        path
    );
    Ok(path)
}
