//! # Filesystem Scaffolding
//!
//! Lays out a topology directory on disk:
//!
//! ```text
//! <output_root>/<topology-name>/
//! |-- topology.yml
//! |-- containers.yml              # only when containers exist
//! |-- <dockerfile-folder>/        # one per dockerfile container
//! \-- provisioning/
//!     |-- requirements.yml
//!     \-- roles/
//!         \-- <host-name>/
//!             |-- files/
//!             |-- tasks/
//!             \-- vars/
//! ```
//!
//! Every step tolerates existing directories, so running a generate twice
//! over the same tree neither fails nor duplicates anything. Files are
//! overwritten in place.

pub mod requirements;

pub use requirements::{render_requirements, RoleRequirement, REQUIRED_ROLES};

use crate::config::{validate_dockerfile_path, validate_host_name};
use crate::containers::Container;
use crate::topology::{generate_topology, Host, Topology, TOPOLOGY_FILE};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

pub const PROVISIONING_DIR: &str = "provisioning";
pub const ROLES_DIR: &str = "roles";
pub const REQUIREMENTS_FILE: &str = "requirements.yml";

/// Subdirectories created for every host role
pub const ROLE_SUBDIRS: [&str; 3] = ["files", "tasks", "vars"];

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .wrap_err_with(|| format!("Failed to create directory '{}'", path.display()))
}

/// Create `provisioning/roles/<host>/{files,tasks,vars}` for every host.
///
/// Host names that would resolve outside `roles/` are refused.
pub fn create_directories(base_dir: &Path, hosts: &[Host]) -> Result<()> {
    for host in hosts {
        validate_host_name(&host.name)?;
    }
    let roles_dir = base_dir.join(PROVISIONING_DIR).join(ROLES_DIR);
    create_dir(&roles_dir)?;

    for host in hosts {
        let host_dir = roles_dir.join(&host.name);
        for sub_dir in ROLE_SUBDIRS {
            create_dir(&host_dir.join(sub_dir))?;
        }
        debug!("Prepared role directories for host '{}'", host.name);
    }

    Ok(())
}

/// Write the fixed `provisioning/requirements.yml`.
pub fn save_requirements(base_dir: &Path) -> Result<PathBuf> {
    let provisioning_dir = base_dir.join(PROVISIONING_DIR);
    create_dir(&provisioning_dir)?;

    let path = provisioning_dir.join(REQUIREMENTS_FILE);
    fs::write(&path, render_requirements())
        .wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
    debug!("Wrote role requirements to {:?}", path);
    Ok(path)
}

/// Create an empty folder for every container built from a Dockerfile.
///
/// Folders must stay inside `base_dir`.
pub fn create_dockerfile_dirs(base_dir: &Path, containers: &[Container]) -> Result<Vec<PathBuf>> {
    for dockerfile in containers.iter().filter_map(Container::dockerfile) {
        validate_dockerfile_path(dockerfile)?;
    }
    let mut created = Vec::new();
    for dockerfile in containers.iter().filter_map(Container::dockerfile) {
        let dir = base_dir.join(dockerfile);
        create_dir(&dir)?;
        created.push(dir);
    }
    Ok(created)
}

/// Write `<output_root>/<name>/topology.yml`, then the role directories and
/// requirements file. Returns the path of `topology.yml`.
pub fn save_topology(output_root: &Path, topology: &Topology) -> Result<PathBuf> {
    for host in &topology.hosts {
        validate_host_name(&host.name)?;
    }
    let content = generate_topology(topology)?;
    let base_dir = output_root.join(&topology.name);
    create_dir(&base_dir)?;

    let path = base_dir.join(TOPOLOGY_FILE);
    fs::write(&path, content)
        .wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
    info!("Wrote topology '{}' to {:?}", topology.name, path);

    create_directories(&base_dir, &topology.hosts)?;
    save_requirements(&base_dir)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use crate::topology::BaseBox;
    use tempfile::TempDir;

    fn host(name: &str) -> Host {
        Host {
            name: name.to_string(),
            base_box: BaseBox {
                image: "debian".to_string(),
                man_user: "debian".to_string(),
            },
            flavor: "m1.tiny".to_string(),
            hidden: false,
            docker: false,
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_create_directories() {
        let dir = TempDir::new().unwrap();
        create_directories(dir.path(), &[host("web"), host("db")]).unwrap();

        let roles = dir.path().join("provisioning/roles");
        assert_eq!(entries(&roles), vec!["db", "web"]);
        assert_eq!(entries(&roles.join("web")), vec!["files", "tasks", "vars"]);
    }

    #[test]
    fn test_create_directories_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let hosts = [host("web")];
        fs::create_dir_all(dir.path().join("provisioning/roles/web/files")).unwrap();
        fs::write(dir.path().join("provisioning/roles/web/files/motd"), "hi").unwrap();

        create_directories(dir.path(), &hosts).unwrap();
        create_directories(dir.path(), &hosts).unwrap();

        let web = dir.path().join("provisioning/roles/web");
        assert_eq!(entries(&web), vec!["files", "tasks", "vars"]);
        assert_eq!(fs::read_to_string(web.join("files/motd")).unwrap(), "hi");
    }

    #[test]
    fn test_create_directories_without_hosts() {
        let dir = TempDir::new().unwrap();
        create_directories(dir.path(), &[]).unwrap();
        assert!(entries(&dir.path().join("provisioning/roles")).is_empty());
    }

    #[test]
    fn test_save_requirements_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = save_requirements(dir.path()).unwrap();
        fs::write(&path, "edited").unwrap();

        let again = save_requirements(dir.path()).unwrap();
        assert_eq!(path, again);
        assert_eq!(fs::read_to_string(&path).unwrap(), render_requirements());
    }

    #[test]
    fn test_create_dockerfile_dirs() {
        let dir = TempDir::new().unwrap();
        let containers = vec![
            Container::new("web", "", "docker/web"),
            Container::new("db", "postgres", ""),
        ];
        let created = create_dockerfile_dirs(dir.path(), &containers).unwrap();
        assert_eq!(created, vec![dir.path().join("docker/web")]);
        assert!(dir.path().join("docker/web").is_dir());
    }

    #[test]
    fn test_save_topology() {
        let dir = TempDir::new().unwrap();
        let topology = Topology {
            name: "lab".to_string(),
            hosts: vec![host("web")],
            ..Default::default()
        };
        let path = save_topology(dir.path(), &topology).unwrap();

        assert_eq!(path, dir.path().join("lab/topology.yml"));
        assert_eq!(fs::read_to_string(&path).unwrap(), generate_topology(&topology).unwrap());
        assert!(dir.path().join("lab/provisioning/requirements.yml").is_file());
        assert!(dir.path().join("lab/provisioning/roles/web/vars").is_dir());
    }

    #[test]
    fn test_escaping_paths_are_refused() {
        let out = TempDir::new().unwrap();
        let base = out.path().join("lab");

        let err = create_directories(&base, &[host("../../../../escaped-host")]).unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());

        let containers = vec![Container::new("web", "", "../../escaped-docker")];
        assert!(create_dockerfile_dirs(&base, &containers).is_err());

        assert!(entries(out.path()).is_empty());
    }
}
