use crate::config::ProjectConfig;
use crate::project::Project;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse a project file
pub fn load_config(config_path: &Path) -> Result<ProjectConfig> {
    info!("Loading project from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open project file '{}'", config_path.display()))?;

    let config: ProjectConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse project file '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// Load a project file and assemble its records
pub fn load_project(config_path: &Path) -> Result<Project> {
    let project = load_config(config_path)?.into_project()?;
    info!(
        "Project '{}': {} hosts, {} routers, {} networks, {} containers",
        project.name(),
        project.topology.hosts.len(),
        project.topology.routers.len(),
        project.topology.networks.len(),
        project.containers.len()
    );
    Ok(project)
}
